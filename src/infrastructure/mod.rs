//! Infrastructure layer - Hashing, tokens, user stores and logging

pub mod auth;
pub mod logging;
pub mod storage;
pub mod user;
