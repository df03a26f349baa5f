use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::doc;

use crate::controllers::auth_controllers::models::{AuthResponse, LoginRequest};
use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::password::verify_password;
use crate::utils::session;

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Response> {
    let users_collection = state.db.collection::<User>("users");

    let user = users_collection
        .find_one(doc! { "username": payload.username.trim() })
        .await?
        .ok_or_else(|| AppError::AuthenticationError("Invalid username or password".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::AuthenticationError(
            "Invalid username or password".to_string(),
        ));
    }

    let user_id = user.id.to_hex();
    let token = session::create_token(&user_id, &user.username)
        .map_err(|e| AppError::InternalError(format!("Failed to create session token: {e}")))?;

    state.audit.logged_in(&user_id, &user.username);

    let cookie_value =
        format!("session_token={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age=86400");

    let mut resp = Json(AuthResponse {
        success: true,
        message: "Logged in successfully".to_string(),
        user_id: Some(user_id),
        username: Some(user.username),
    })
    .into_response();

    resp.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(&cookie_value)
            .map_err(|e| AppError::InternalError(format!("Failed to build cookie: {e}")))?,
    );

    Ok(resp)
}
