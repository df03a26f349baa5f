use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::controllers::auth_controllers::models::AuthResponse;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session;

/// Clears the session cookie. Logging out with no valid session is still a
/// success; only verified sessions reach the audit trail.
pub async fn logout(State(state): State<AppState>, cookie_jar: CookieJar) -> AppResult<Response> {
    if let Some(cookie) = cookie_jar.get("session_token") {
        if let Ok(claims) = session::verify_token(cookie.value()) {
            state.audit.logged_out(&claims.sub, &claims.username);
        }
    }

    let cookie_value = "session_token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";

    let mut resp = Json(AuthResponse {
        success: true,
        message: "Logged out successfully".to_string(),
        user_id: None,
        username: None,
    })
    .into_response();

    resp.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(cookie_value)
            .map_err(|e| AppError::InternalError(format!("Failed to build cookie: {e}")))?,
    );

    Ok(resp)
}
