//! User service: accounts and session tokens.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use vidplan_common::{AppError, AppResult, IdGenerator};
use vidplan_db::{entities::user, repositories::UserRepository};

use crate::identity::RequestContext;

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for signing up and signing in.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsInput {
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Usernames are limited to ASCII letters, digits and underscores.
fn validate_username(username: &str) -> AppResult<()> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Username may only contain letters, digits and underscores".to_string(),
        ))
    }
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new user and issue a session token.
    pub async fn signup(&self, input: CredentialsInput) -> AppResult<user::Model> {
        input.validate()?;
        validate_username(&input.username)?;

        if self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let user_id = self.id_gen.generate();

        let user = self
            .user_repo
            .create(user::ActiveModel {
                id: Set(user_id),
                username: Set(input.username.clone()),
                username_lower: Set(input.username.to_lowercase()),
                password_hash: Set(password_hash),
                token: Set(Some(self.id_gen.generate_token())),
                created_at: Set(Utc::now().into()),
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User signed up");
        Ok(user)
    }

    /// Verify credentials and return the user with a usable token.
    pub async fn signin(&self, input: CredentialsInput) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(AppError::Unauthenticated);
        }

        if user.token.is_some() {
            return Ok(user);
        }

        let token = self.id_gen.generate_token();
        let user = self.user_repo.set_token(user, Some(token)).await?;

        tracing::info!(user_id = %user.id, "Issued session token");
        Ok(user)
    }

    /// Invalidate the caller's session token.
    pub async fn signout(&self, ctx: &RequestContext) -> AppResult<()> {
        let user = self.me(ctx).await?;
        let user_id = user.id.clone();

        self.user_repo.set_token(user, None).await?;

        tracing::info!(user_id = %user_id, "User signed out");
        Ok(())
    }

    /// Authenticate a user by session token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthenticated)
    }

    /// The caller's own account.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<user::Model> {
        let user_id = ctx.resolve_user()?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthenticated)
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, username: &str, password: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            password_hash: hash_password(password).unwrap(),
            token: Some("test_token".to_string()),
            created_at: Utc::now().into(),
        }
    }

    fn service(db: DatabaseConnection) -> UserService {
        UserService::new(UserRepository::new(Arc::new(db)))
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("test_password_123", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("test", "invalid_hash").is_err());
    }

    #[test]
    fn test_username_charset() {
        assert!(validate_username("good_name_1").is_ok());
        assert!(matches!(
            validate_username("bad name!"),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_signup_rejects_taken_username() {
        let existing = create_test_user("user1", "Alice", "password123");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .into_connection();

        let result = service(db)
            .signup(CredentialsInput {
                username: "alice".to_string(),
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_signup_short_password_never_hits_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = service(db)
            .signup(CredentialsInput {
                username: "alice".to_string(),
                password: "short".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_signin_wrong_password() {
        let existing = create_test_user("user1", "alice", "password123");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .into_connection();

        let result = service(db)
            .signin(CredentialsInput {
                username: "alice".to_string(),
                password: "not-the-password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_signin_returns_existing_token() {
        let existing = create_test_user("user1", "alice", "password123");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .into_connection();

        let user = service(db)
            .signin(CredentialsInput {
                username: "alice".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.token.as_deref(), Some("test_token"));
    }

    #[tokio::test]
    async fn test_authenticate_by_token_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let result = service(db).authenticate_by_token("revoked").await;

        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_me_requires_identity() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = service(db).me(&RequestContext::anonymous()).await;

        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }
}
