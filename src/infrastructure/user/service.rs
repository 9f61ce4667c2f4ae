//! Auth service for registration, login and session resolution

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use crate::domain::DomainError;
use crate::domain::user::{NewUser, User, UserId, UserRepository, validate_email};
use crate::infrastructure::auth::TokenService;

use super::password::{PasswordError, PasswordHasher};

pub const PASSWORD_MISMATCH: &str = "Password doesn't match";
pub const USER_NOT_FOUND: &str = "User not found";
pub const INCORRECT_PASSWORD: &str = "Incorrect password";

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub user: User,
    pub token: String,
}

/// Auth service orchestrating the user store, password hasher and token service
#[derive(Debug, Clone)]
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(
        repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    /// Lifetime of issued session tokens
    pub fn token_lifetime(&self) -> Duration {
        self.tokens.lifetime()
    }

    /// Register a new user
    ///
    /// Nothing is written to the store unless the password confirmation matches.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        if request.password != request.password_confirm {
            debug!("Registration rejected: password confirmation mismatch");
            return Err(DomainError::validation(PASSWORD_MISMATCH));
        }

        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;

        let password_hash = self.hash_password(request.password).await?;

        let new_user = NewUser::new(
            request.first_name,
            request.last_name,
            request.email,
            password_hash,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        let user = self.repository.create(new_user).await?;

        info!(user_id = %user.id(), "User registered");

        Ok(user)
    }

    /// Authenticate with email and password and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession, DomainError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                debug!("Login rejected: unknown email");
                DomainError::not_found(USER_NOT_FOUND)
            })?;

        if !self
            .verify_password(user.password_hash().to_string(), password.to_string())
            .await?
        {
            debug!(user_id = %user.id(), "Login rejected: incorrect password");
            return Err(DomainError::unauthorized(INCORRECT_PASSWORD));
        }

        let token = self.tokens.issue(user.id())?;

        info!(user_id = %user.id(), "User logged in");

        Ok(LoginSession { user, token })
    }

    /// Resolve the user a session token belongs to
    ///
    /// Missing, invalid and expired tokens are rejected as unauthorized; a valid
    /// token whose user no longer exists is reported as not found.
    pub async fn current_user(&self, token: &str) -> Result<User, DomainError> {
        let user_id = self.tokens.parse(token).map_err(|e| {
            debug!(error = %e, "Session token rejected");
            DomainError::from(e)
        })?;

        self.find_user(user_id).await
    }

    async fn find_user(&self, id: UserId) -> Result<User, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(USER_NOT_FOUND))
    }

    // Argon2 is CPU-bound; keep it off the async workers
    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let hasher = self.hasher.clone();

        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))??;

        Ok(hash)
    }

    async fn verify_password(&self, hash: String, password: String) -> Result<bool, DomainError> {
        let hasher = self.hasher.clone();

        let matches: Result<bool, PasswordError> =
            tokio::task::spawn_blocking(move || hasher.verify(&hash, &password))
                .await
                .map_err(|e| DomainError::internal(format!("Verification task failed: {}", e)))?;

        Ok(matches?)
    }
}
