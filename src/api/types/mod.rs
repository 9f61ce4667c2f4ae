//! API request/response types

pub mod error;
pub mod json;

pub use error::{ApiError, INTERNAL_ERROR_MESSAGE, MessageResponse};
pub use json::Json;
