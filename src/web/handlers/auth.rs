//! Authentication handlers.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{AuthService, MSG_LOGIN_OK, MSG_LOGOUT_OK, MSG_SIGNUP_OK};
use crate::web::dto::{ApiResponse, JsonBody, LoginRequest, SignupRequest};
use crate::web::error::ApiError;
use crate::web::middleware::SessionCookies;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authentication flow.
    pub auth: AuthService,
    /// Session cookie policy.
    pub cookies: SessionCookies,
}

impl AppState {
    /// Create a new application state.
    pub fn new(auth: AuthService, cookies: SessionCookies) -> Self {
        Self { auth, cookies }
    }
}

/// POST /api/v1/auth/signup - Register a new user.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<(CookieJar, Json<ApiResponse>), ApiError> {
    let session = state
        .auth
        .signup(&req.username, &req.email, &req.password)
        .await?;

    let jar = state.cookies.issue(jar, session.token);
    Ok((jar, Json(ApiResponse::with_user(session.user, MSG_SIGNUP_OK))))
}

/// POST /api/v1/auth/login - User login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse>), ApiError> {
    let session = state.auth.login(&req.username, &req.password).await?;

    let jar = state.cookies.issue(jar, session.token);
    Ok((jar, Json(ApiResponse::with_user(session.user, MSG_LOGIN_OK))))
}

/// GET /api/v1/auth/fetch-user - Current session's user.
pub async fn fetch_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<ApiResponse>, ApiError> {
    let user = state.auth.fetch_user(state.cookies.read(&jar)).await?;
    Ok(Json(ApiResponse::user(user)))
}

/// POST /api/v1/auth/logout - Clear the session cookie.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse>) {
    state.auth.logout(state.cookies.read(&jar));

    let jar = state.cookies.clear(jar);
    (jar, Json(ApiResponse::message(MSG_LOGOUT_OK)))
}
