use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// User entity - matches SQL schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Display name (unique)
    pub username: String,
    /// User email (unique)
    pub email: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Contact phone number, exactly 10 digits when present
    pub phonenumber: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phonenumber: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            phonenumber: user.phonenumber,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 5, max = 64, message = "must be at least 5 characters"))]
    pub username: String,
    #[validate(email(message = "must be a valid email address"), length(max = 255))]
    pub email: String,
    pub password: String,
    #[validate(custom(function = validate_phonenumber))]
    pub phonenumber: Option<String>,
}

/// DTO for updating an existing user
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 5, max = 64, message = "must be at least 5 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "must be a valid email address"), length(max = 255))]
    pub email: Option<String>,
    pub password: Option<String>,
    #[validate(custom(function = validate_phonenumber))]
    pub phonenumber: Option<String>,
}

/// DTO for user login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"), length(max = 255))]
    pub email: String,
    pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token for subsequent requests
    pub token: String,
    pub user: UserResponse,
}

fn validate_phonenumber(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phonenumber");
        err.message = Some("must be exactly 10 digits".into());
        Err(err)
    }
}

impl User {
    /// Create a new user (password must already be hashed by the service layer)
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        phonenumber: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username,
            email,
            password_hash,
            phonenumber,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates (password should already be hashed if provided)
    pub fn apply_update(&mut self, update: UpdateUser, new_password_hash: Option<String>) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(hash) = new_password_hash {
            self.password_hash = hash;
        }
        if let Some(phonenumber) = update.phonenumber {
            self.phonenumber = Some(phonenumber);
        }
        self.updated_at = Utc::now();
    }
}
