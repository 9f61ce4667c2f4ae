//! Session cookie construction

use axum_extra::extract::cookie::Cookie;
use time::OffsetDateTime;

use crate::api::state::SessionCookieConfig;

/// How far in the past a cleared cookie's expiry is set
const CLEARED_COOKIE_AGE: time::Duration = time::Duration::hours(1);

/// Cookie carrying a freshly issued session token
pub fn session_cookie(
    config: &SessionCookieConfig,
    token: String,
    lifetime: chrono::Duration,
) -> Cookie<'static> {
    let expires =
        OffsetDateTime::now_utc().saturating_add(time::Duration::seconds(lifetime.num_seconds()));

    Cookie::build((config.name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .expires(expires)
        .build()
}

/// Cookie with an empty value and an expiry in the past
///
/// Instructs the client to drop its session cookie immediately.
pub fn cleared_session_cookie(config: &SessionCookieConfig) -> Cookie<'static> {
    let expires = OffsetDateTime::now_utc() - CLEARED_COOKIE_AGE;

    Cookie::build((config.name.clone(), String::new()))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .expires(expires)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionCookieConfig::default();
        let before = OffsetDateTime::now_utc();

        let cookie = session_cookie(&config, "tok".to_string(), chrono::Duration::hours(24));

        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));

        let expires = cookie.expires_datetime().unwrap();
        assert!(expires >= before + time::Duration::hours(24) - time::Duration::seconds(1));
        assert!(expires <= OffsetDateTime::now_utc() + time::Duration::hours(24));
    }

    #[test]
    fn test_cleared_cookie_is_expired() {
        let config = SessionCookieConfig::default();
        let now = OffsetDateTime::now_utc();

        let cookie = cleared_session_cookie(&config);

        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.http_only(), Some(true));
        assert!(cookie.expires_datetime().unwrap() < now);
    }

    #[test]
    fn test_secure_flag_follows_config() {
        let config = SessionCookieConfig {
            name: "session".to_string(),
            secure: true,
        };

        let cookie = session_cookie(&config, "tok".to_string(), chrono::Duration::hours(1));

        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.secure(), Some(true));
    }
}
