//! Authentication infrastructure module
//!
//! This module provides JWT session token management for user authentication.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtService, MAX_TOKEN_TTL_HOURS, TokenError, TokenService};
