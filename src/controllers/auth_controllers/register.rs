use axum::{extract::State, Json};
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use tracing::info;

use crate::controllers::auth_controllers::models::{AuthResponse, RegisterRequest};
use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::password::hash_password;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let users_collection = state.db.collection::<User>("users");

    let username = payload.username.trim();
    if username.is_empty() {
        return Err(AppError::ValidationError(
            "Username is required".to_string(),
        ));
    }
    if payload.password.len() < 8 {
        return Err(AppError::ValidationError(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let existing = users_collection
        .find_one(doc! { "username": username })
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "That username is already taken".to_string(),
        ));
    }

    let user = User {
        id: ObjectId::new(),
        username: username.to_string(),
        password_hash: hash_password(&payload.password)?,
        created_at: DateTime::now(),
    };

    users_collection.insert_one(&user).await?;

    info!(user = %user.id, username, "user registered");

    Ok(Json(AuthResponse {
        success: true,
        message: "Registered successfully".to_string(),
        user_id: Some(user.id.to_hex()),
        username: Some(user.username),
    }))
}
