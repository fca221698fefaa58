use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserResponse};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user with password hashing
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        validate_password(&input.password)?;

        if self.repository.email_exists(&input.email).await? {
            return Err(UserError::DuplicateEmail(input.email));
        }
        if self.repository.username_exists(&input.username).await? {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(input.username, input.email, password_hash, input.phonenumber);

        let created = self.repository.create(user).await?;
        Ok(created.into())
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    /// List all users (password hashes never leave the domain model)
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    /// Update a user. Only the user themselves may do this.
    pub async fn update_user(
        &self,
        actor: Uuid,
        id: Uuid,
        input: UpdateUser,
    ) -> UserResult<UserResponse> {
        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if actor != id {
            return Err(UserError::Forbidden);
        }

        let new_password_hash = match input.password {
            Some(ref password) => {
                validate_password(password)?;
                Some(self.hash_password(password)?)
            }
            None => None,
        };

        if let Some(ref new_email) = input.email {
            if !new_email.eq_ignore_ascii_case(&user.email)
                && self.repository.email_exists(new_email).await?
            {
                return Err(UserError::DuplicateEmail(new_email.clone()));
            }
        }
        if let Some(ref new_username) = input.username {
            if new_username != &user.username
                && self.repository.username_exists(new_username).await?
            {
                return Err(UserError::DuplicateUsername(new_username.clone()));
            }
        }

        user.apply_update(input, new_password_hash);

        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    /// Delete a user. Only the user themselves may do this.
    pub async fn delete_user(&self, actor: Uuid, id: Uuid) -> UserResult<()> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(UserError::NotFound(id));
        }
        if actor != id {
            return Err(UserError::Forbidden);
        }

        self.repository.delete(id).await?;
        Ok(())
    }

    /// Verify user credentials (for login)
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user.into())
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Password strength rules. Username/email/phone shape is handled by
/// `ValidatedJson` at the handler level.
fn validate_password(password: &str) -> UserResult<()> {
    if password.len() < 8 {
        return Err(UserError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(UserError::Validation(
            "Password cannot exceed 128 characters".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(UserError::Validation(
            "Password must contain at least one digit".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(UserError::Validation(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(UserError::Validation(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    fn valid_input() -> CreateUser {
        CreateUser {
            username: "winelover".to_string(),
            email: "somebody@example.com".to_string(),
            password: "Secret123".to_string(),
            phonenumber: None,
        }
    }

    #[tokio::test]
    async fn creates_user_and_hashes_password() {
        let service = service();
        let created = service.create_user(valid_input()).await.unwrap();

        assert_eq!(created.username, "winelover");

        // The stored hash must verify against the original password
        let verified = service
            .verify_credentials("somebody@example.com", "Secret123")
            .await
            .unwrap();
        assert_eq!(verified.id, created.id);
    }

    #[tokio::test]
    async fn rejects_password_without_digit() {
        let mut input = valid_input();
        input.password = "Secretpassword".to_string();

        let err = service().create_user(input).await.unwrap_err();
        assert!(matches!(err, UserError::Validation(msg) if msg.contains("digit")));
    }

    #[tokio::test]
    async fn rejects_password_without_uppercase() {
        let mut input = valid_input();
        input.password = "secret123".to_string();

        let err = service().create_user(input).await.unwrap_err();
        assert!(matches!(err, UserError::Validation(msg) if msg.contains("uppercase")));
    }

    #[tokio::test]
    async fn rejects_password_without_lowercase() {
        let mut input = valid_input();
        input.password = "SECRET123".to_string();

        let err = service().create_user(input).await.unwrap_err();
        assert!(matches!(err, UserError::Validation(msg) if msg.contains("lowercase")));
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let service = service();
        service.create_user(valid_input()).await.unwrap();

        let mut second = valid_input();
        second.username = "otheruser".to_string();
        let err = service.create_user(second).await.unwrap_err();
        assert!(matches!(err, UserError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let service = service();
        service.create_user(valid_input()).await.unwrap();

        let err = service
            .verify_credentials("somebody@example.com", "Wrong123")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_with_unknown_email_fails() {
        let err = service()
            .verify_credentials("ghost@example.com", "Secret123")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn update_by_another_user_is_forbidden() {
        let service = service();
        let created = service.create_user(valid_input()).await.unwrap();

        let err = service
            .update_user(Uuid::now_v7(), created.id, UpdateUser::default())
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Forbidden));
    }

    #[tokio::test]
    async fn update_rehashes_new_password() {
        let service = service();
        let created = service.create_user(valid_input()).await.unwrap();

        let update = UpdateUser {
            password: Some("Fresh456pw".to_string()),
            ..Default::default()
        };
        service
            .update_user(created.id, created.id, update)
            .await
            .unwrap();

        assert!(service
            .verify_credentials("somebody@example.com", "Fresh456pw")
            .await
            .is_ok());
        assert!(matches!(
            service
                .verify_credentials("somebody@example.com", "Secret123")
                .await,
            Err(UserError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn delete_unknown_user_is_not_found() {
        let id = Uuid::now_v7();
        let err = service().delete_user(id, id).await.unwrap_err();
        assert!(matches!(err, UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_never_exposes_password_material() {
        let service = service();
        service.create_user(valid_input()).await.unwrap();

        let users = service.list_users().await.unwrap();
        let json = serde_json::to_value(&users).unwrap();
        let raw = json.to_string();
        assert!(!raw.contains("password"));
        assert!(!raw.contains("argon2"));
    }
}
