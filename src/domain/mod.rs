//! Domain layer - Core entities and contracts

pub mod error;
pub mod user;

pub use error::DomainError;
