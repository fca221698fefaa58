use axum::{extract::State, routing::post, Json, Router};
use axum_helpers::{JwtAuth, ValidatedJson};
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, LoginResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// State for the login endpoint: credential checks plus token issuing.
pub struct AuthState<R: UserRepository> {
    pub service: Arc<UserService<R>>,
    pub jwt_auth: JwtAuth,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            jwt_auth: self.jwt_auth.clone(),
        }
    }
}

pub fn auth_router<R: UserRepository + 'static>(
    service: Arc<UserService<R>>,
    jwt_auth: JwtAuth,
) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .with_state(AuthState { service, jwt_auth })
}

/// Exchange credentials for a bearer token
///
/// POST /auth/login
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<LoginResponse>> {
    let user = state
        .service
        .verify_credentials(&input.email, &input.password)
        .await?;

    let token = state
        .jwt_auth
        .create_access_token(user.id, &user.username)
        .map_err(|e| UserError::Internal(format!("Failed to issue token: {}", e)))?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse { token, user }))
}
