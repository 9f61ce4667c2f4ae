//! Cookie Auth
//!
//! Session authentication for a web backend:
//! - Registration with Argon2 password hashing
//! - Login issuing a signed JWT carried in an HTTP-only cookie
//! - Current user resolution from the session cookie
//! - Logout by expiring the cookie
//!
//! Users live in memory or in PostgreSQL.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::{AppState, SessionCookieConfig};
use domain::user::UserRepository;
use infrastructure::{
    auth::JwtService,
    storage::UserStoreFactory,
    user::{Argon2Hasher, AuthService},
};
use tracing::{info, warn};

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage = config.storage.storage_config()?;
    info!(backend = ?storage.storage_type(), "Creating user store");

    let repository = UserStoreFactory::create(&storage).await?;

    create_app_state_with_store(config, repository)
}

/// Create the application state around an existing user store
pub fn create_app_state_with_store(
    config: &AppConfig,
    repository: Arc<dyn UserRepository>,
) -> anyhow::Result<AppState> {
    if config.auth.uses_default_secret() {
        warn!("auth.jwt_secret is the development default; set APP__AUTH__JWT_SECRET");
    }

    let hasher = Argon2Hasher::new(config.auth.password)?;
    let tokens = JwtService::new(config.auth.jwt_config()?);

    let auth_service = AuthService::new(repository, Arc::new(hasher), Arc::new(tokens));

    let session_cookie = SessionCookieConfig {
        name: config.auth.cookie_name.clone(),
        secure: config.auth.cookie_secure,
    };

    Ok(AppState::new(Arc::new(auth_service), session_cookie))
}
