//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::user::AuthService;

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct SessionCookieConfig {
    /// Cookie name carrying the session token
    pub name: String,
    /// Add the `Secure` attribute
    pub secure: bool,
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self {
            name: "jwt".to_string(),
            secure: false,
        }
    }
}

/// Application state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub session_cookie: SessionCookieConfig,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>, session_cookie: SessionCookieConfig) -> Self {
        Self {
            auth_service,
            session_cookie,
        }
    }
}

#[cfg(test)]
pub const TEST_JWT_SECRET: &str = "api-test-secret";

#[cfg(test)]
impl AppState {
    /// State wired to the given store with a fast hasher and a fixed secret
    pub fn for_tests(repository: Arc<dyn crate::domain::user::UserRepository>) -> Self {
        use crate::infrastructure::user::{Argon2Hasher, PasswordHashConfig};

        let hasher = Argon2Hasher::new(PasswordHashConfig {
            memory_cost_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();

        Self::for_tests_with_hasher(repository, Arc::new(hasher))
    }

    /// State wired to the given store and hasher
    pub fn for_tests_with_hasher(
        repository: Arc<dyn crate::domain::user::UserRepository>,
        hasher: Arc<dyn crate::infrastructure::user::PasswordHasher>,
    ) -> Self {
        use crate::infrastructure::auth::{JwtConfig, JwtService};

        let tokens = JwtService::new(JwtConfig::new(TEST_JWT_SECRET, 24).unwrap());
        let auth_service = AuthService::new(repository, hasher, Arc::new(tokens));

        Self::new(Arc::new(auth_service), SessionCookieConfig::default())
    }
}
