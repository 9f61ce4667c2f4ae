//! User infrastructure module
//!
//! This module provides implementations for user authentication,
//! including password hashing with Argon2, in-memory and PostgreSQL
//! user stores, and the auth service.

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordError, PasswordHashConfig, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{
    AuthService, INCORRECT_PASSWORD, LoginSession, PASSWORD_MISMATCH, RegisterRequest,
    USER_NOT_FOUND,
};

#[cfg(test)]
pub use password::mock::CountingHasher;
