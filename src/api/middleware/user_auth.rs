//! Session cookie authentication

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// Extractor resolving the user behind the session cookie
///
/// A missing cookie is handed to the auth service as an empty token, which it
/// rejects as unauthenticated.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, &state.session_cookie.name);

        if token.is_none() {
            debug!(cookie = %state.session_cookie.name, "No session cookie on request");
        }

        let user = state
            .auth_service
            .current_user(token.as_deref().unwrap_or_default())
            .await?;

        Ok(CurrentUser(user))
    }
}

/// Read the session token from the request cookies
pub fn session_token(headers: &axum::http::HeaderMap, cookie_name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    #[test]
    fn test_session_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; jwt=eyJhbGciOiJIUzI1NiJ9.test"),
        );

        assert_eq!(
            session_token(&headers, "jwt").as_deref(),
            Some("eyJhbGciOiJIUzI1NiJ9.test")
        );
    }

    #[test]
    fn test_missing_cookie() {
        let headers = HeaderMap::new();
        assert!(session_token(&headers, "jwt").is_none());
    }

    #[test]
    fn test_other_cookie_name() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session=abc"));

        assert!(session_token(&headers, "jwt").is_none());
        assert_eq!(session_token(&headers, "session").as_deref(), Some("abc"));
    }
}
