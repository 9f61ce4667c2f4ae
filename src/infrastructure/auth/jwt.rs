//! JWT session token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

use crate::domain::DomainError;
use crate::domain::user::UserId;

/// Errors raised by token issuance and parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No token was presented
    #[error("Missing token")]
    Missing,

    /// Bad signature, malformed structure or unusable subject
    #[error("Invalid token: {0}")]
    Invalid(String),

    /// The token's expiry has elapsed
    #[error("Token expired")]
    Expired,

    /// Signing failed while issuing a token
    #[error("Failed to sign token: {0}")]
    Signing(String),

    /// The configured token lifetime is zero or out of range
    #[error("Invalid token lifetime: {0} hours (must be between 1 and 87600)")]
    InvalidLifetime(u64),
}

/// Longest accepted session lifetime (ten years)
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365 * 10;

impl From<TokenError> for DomainError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) => DomainError::internal(err.to_string()),
            TokenError::InvalidLifetime(_) => DomainError::configuration(err.to_string()),
            TokenError::Missing => DomainError::unauthorized("Unauthenticated"),
            TokenError::Expired => DomainError::unauthorized("Session expired"),
            TokenError::Invalid(_) => DomainError::unauthorized("Invalid session token"),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID as a decimal string)
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a user
    pub fn new(subject: UserId, lifetime: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| TokenError::Signing("expiry out of range".to_string()))?;

        Ok(Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    /// Parse the subject back into a user ID
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub
            .parse()
            .map_err(|e| TokenError::Invalid(format!("bad subject: {}", e)))
    }
}

/// Configuration for JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    lifetime: Duration,
}

impl JwtConfig {
    /// Create new JWT configuration
    ///
    /// Rejects a lifetime of zero or above [`MAX_TOKEN_TTL_HOURS`].
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Result<Self, TokenError> {
        if expiration_hours == 0 || expiration_hours > MAX_TOKEN_TTL_HOURS {
            return Err(TokenError::InvalidLifetime(expiration_hours));
        }

        let lifetime = i64::try_from(expiration_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or(TokenError::InvalidLifetime(expiration_hours))?;

        Ok(Self {
            secret: secret.into(),
            lifetime,
        })
    }

    /// Lifetime of issued tokens
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}

/// Trait for session token operations
pub trait TokenService: Send + Sync + Debug {
    /// Issue a signed token for a user
    fn issue(&self, subject: UserId) -> Result<String, TokenError>;

    /// Verify a token and return its subject
    fn parse(&self, token: &str) -> Result<UserId, TokenError>;

    /// Lifetime of newly issued tokens
    fn lifetime(&self) -> Duration;
}

/// HS256 token service keyed by a shared secret
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("lifetime", &self.config.lifetime)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Decode and verify a token, returning its claims
    pub fn decode_claims(&self, token: &str) -> Result<JwtClaims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

impl TokenService for JwtService {
    fn issue(&self, subject: UserId) -> Result<String, TokenError> {
        let claims = JwtClaims::new(subject, self.lifetime())?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn parse(&self, token: &str) -> Result<UserId, TokenError> {
        self.decode_claims(token)?.user_id()
    }

    fn lifetime(&self) -> Duration {
        self.config.lifetime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_id(id: i64) -> UserId {
        UserId::new(id).unwrap()
    }

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345", 24).unwrap())
    }

    fn sign_raw(claims: &JwtClaims, secret: &[u8]) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_parse() {
        let service = create_service();

        let token = service.issue(user_id(7)).unwrap();
        assert!(!token.is_empty());

        assert_eq!(service.parse(&token).unwrap(), user_id(7));
    }

    #[test]
    fn test_claims_carry_subject_and_expiry() {
        let service = create_service();

        let token = service.issue(user_id(3)).unwrap();
        let claims = service.decode_claims(&token).unwrap();

        assert_eq!(claims.sub, "3");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_empty_token() {
        let service = create_service();

        assert_eq!(service.parse(""), Err(TokenError::Missing));
    }

    #[test]
    fn test_malformed_token() {
        let service = create_service();

        let result = service.parse("invalid-token");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("secret-1", 24).unwrap());
        let service2 = JwtService::new(JwtConfig::new("secret-2", 24).unwrap());

        let token = service1.issue(user_id(1)).unwrap();

        // Token generated with different secret should fail validation
        let result = service2.parse(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_is_distinct_from_bad_signature() {
        let service = JwtService::new(JwtConfig::new("test-secret", 24).unwrap());

        let past_time = Utc::now() - Duration::hours(1);
        let claims = JwtClaims {
            sub: "1".to_string(),
            iat: (past_time - Duration::hours(2)).timestamp(),
            exp: past_time.timestamp(),
        };

        let expired = sign_raw(&claims, b"test-secret");
        assert_eq!(service.parse(&expired), Err(TokenError::Expired));

        let forged = sign_raw(&claims, b"other-secret");
        assert!(matches!(service.parse(&forged), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_non_numeric_subject() {
        let service = JwtService::new(JwtConfig::new("test-secret", 24).unwrap());

        let claims = JwtClaims {
            sub: "admin".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };

        let token = sign_raw(&claims, b"test-secret");
        assert!(matches!(service.parse(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_zero_subject() {
        let service = JwtService::new(JwtConfig::new("test-secret", 24).unwrap());

        let claims = JwtClaims {
            sub: "0".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };

        let token = sign_raw(&claims, b"test-secret");
        assert!(matches!(service.parse(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_lifetime() {
        let service = JwtService::new(JwtConfig::new("secret", 48).unwrap());
        assert_eq!(service.lifetime(), Duration::hours(48));
    }

    #[test]
    fn test_lifetime_out_of_range() {
        assert_eq!(
            JwtConfig::new("secret", 0).unwrap_err(),
            TokenError::InvalidLifetime(0)
        );
        assert_eq!(
            JwtConfig::new("secret", u64::MAX).unwrap_err(),
            TokenError::InvalidLifetime(u64::MAX)
        );
        assert_eq!(
            JwtConfig::new("secret", 1 << 52).unwrap_err(),
            TokenError::InvalidLifetime(1 << 52)
        );
    }

    #[test]
    fn test_longest_lifetime_issues_live_tokens() {
        let service = JwtService::new(JwtConfig::new("secret", MAX_TOKEN_TTL_HOURS).unwrap());

        let token = service.issue(user_id(5)).unwrap();

        assert_eq!(service.parse(&token).unwrap(), user_id(5));
        assert_eq!(
            service.lifetime(),
            Duration::hours(MAX_TOKEN_TTL_HOURS as i64)
        );
    }

    #[test]
    fn test_claims_reject_overflowing_expiry() {
        let result = JwtClaims::new(user_id(1), Duration::MAX);
        assert!(matches!(result, Err(TokenError::Signing(_))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let service = create_service();
        let debug = format!("{:?}", service);

        assert!(!debug.contains("test-secret-key-12345"));
        assert!(debug.contains("[hidden]"));
    }

    #[test]
    fn test_error_conversion() {
        let err: DomainError = TokenError::Expired.into();
        assert!(matches!(err, DomainError::Unauthorized { .. }));

        let err: DomainError = TokenError::Signing("boom".to_string()).into();
        assert!(matches!(err, DomainError::Internal { .. }));

        let err: DomainError = TokenError::InvalidLifetime(0).into();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }
}
