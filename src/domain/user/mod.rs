//! User domain
//!
//! This module provides domain types and traits for user authentication,
//! including user entities, validation, and the user store contract.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use repository::UserRepository;
pub use validation::{UserValidationError, validate_email, validate_user_id};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
