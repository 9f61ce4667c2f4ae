//! Authentication API endpoints
//!
//! Registration, login, current user and logout. The session token travels in
//! an HTTP-only cookie; login also returns it in the body for non-cookie clients.

mod cookie;

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, MessageResponse};
use crate::domain::user::User;
use crate::infrastructure::user::RegisterRequest;

pub use cookie::{cleared_session_cookie, session_cookie};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/user", get(get_current_user))
        .route("/logout", post(logout))
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl From<RegisterBody> for RegisterRequest {
    fn from(body: RegisterBody) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
            password_confirm: body.password_confirm,
        }
    }
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// User response (safe to expose)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id().value(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Register a new user
///
/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth_service.register(body.into()).await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Login with email and password
///
/// POST /api/login
///
/// Sets the session cookie and returns the token string.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Result<(CookieJar, Json<String>), ApiError> {
    let session = state
        .auth_service
        .login(&body.email, &body.password)
        .await?;

    let cookie = session_cookie(
        &state.session_cookie,
        session.token.clone(),
        state.auth_service.token_lifetime(),
    );

    Ok((jar.add(cookie), Json(session.token)))
}

/// Get the user owning the session cookie
///
/// GET /api/user
pub async fn get_current_user(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from_user(&user))
}

/// Logout by expiring the session cookie
///
/// POST /api/logout
///
/// Tokens are stateless, so nothing changes server side.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    info!("Session cookie cleared");

    (
        jar.add(cleared_session_cookie(&state.session_cookie)),
        Json(MessageResponse::new("success")),
    )
}
