use core_config::{env_required, ConfigError, FromEnv};

const MIN_SECRET_LENGTH: usize = 32;

/// JWT signing configuration.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
}

impl JwtConfig {
    /// Construct with an explicit secret. Rejects secrets shorter than 32
    /// bytes since HS256 security depends on key entropy.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!("must be at least {} characters", MIN_SECRET_LENGTH),
            });
        }
        Ok(Self { secret })
    }
}

impl FromEnv for JwtConfig {
    /// Reads the required `JWT_SECRET` variable.
    fn from_env() -> Result<Self, ConfigError> {
        Self::new(env_required("JWT_SECRET")?)
    }
}
