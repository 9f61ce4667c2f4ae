//! Password hashing utilities using Argon2

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as Argon2PasswordHasher,
    PasswordVerifier, Version,
    password_hash::{Error as PasswordHashError, SaltString, rand_core::OsRng},
};
use serde::Deserialize;
use std::fmt::Debug;
use thiserror::Error;

use crate::domain::DomainError;

/// Errors raised by password hashing and verification
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PasswordError {
    /// The primitive rejected the input (e.g. length limits)
    #[error("Failed to hash password: {0}")]
    Hashing(String),

    /// The stored digest could not be parsed
    #[error("Malformed password digest: {0}")]
    MalformedDigest(String),

    /// The configured work factor is out of range
    #[error("Invalid password hashing parameters: {0}")]
    InvalidParams(String),
}

impl From<PasswordError> for DomainError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::InvalidParams(_) => DomainError::configuration(err.to_string()),
            _ => DomainError::internal(err.to_string()),
        }
    }
}

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password into a storable digest
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Verify a password against a stored digest
    ///
    /// Returns `Ok(false)` on mismatch; errors only for a malformed digest.
    fn verify(&self, hash: &str, password: &str) -> Result<bool, PasswordError>;
}

/// Argon2 work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PasswordHashConfig {
    /// Memory cost in KiB
    pub memory_cost_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id-based password hasher with a fixed work factor
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Create a hasher with the given work factor
    pub fn new(config: PasswordHashConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_cost_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hashing(e.to_string()))
    }

    fn verify(&self, hash: &str, password: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedDigest(e.to_string()))?;

        // Parameters embedded in the digest take precedence over ours
        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedDigest(e.to_string())),
        }
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Low-cost Argon2 hasher that counts how often it is called
    #[derive(Debug)]
    pub struct CountingHasher {
        inner: Argon2Hasher,
        hash_calls: AtomicUsize,
        verify_calls: AtomicUsize,
    }

    impl CountingHasher {
        pub fn new() -> Self {
            let inner = Argon2Hasher::new(PasswordHashConfig {
                memory_cost_kib: 1024,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap();

            Self {
                inner,
                hash_calls: AtomicUsize::new(0),
                verify_calls: AtomicUsize::new(0),
            }
        }

        pub fn hash_calls(&self) -> usize {
            self.hash_calls.load(Ordering::SeqCst)
        }

        pub fn verify_calls(&self) -> usize {
            self.verify_calls.load(Ordering::SeqCst)
        }
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, password: &str) -> Result<String, PasswordError> {
            self.hash_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.hash(password)
        }

        fn verify(&self, hash: &str, password: &str) -> Result<bool, PasswordError> {
            self.verify_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.verify(hash, password)
        }
    }
}
