use axum::{
    extract::{Extension, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db::services;
use crate::web::models::{AuthenticatedUser, UserResponse};
use crate::web::{AppError, AppState};

// --- Request/Response Structs ---

#[derive(Deserialize)]
pub struct UserSearchQuery {
    pub email: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct CreateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

// --- Route Handlers ---

async fn search_users_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let fragment = query
        .email
        .filter(|email| !email.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Email parameter is required".to_string()))?;

    let users = services::search_users_by_email(&app_state.db_pool, &fragment)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let users: Vec<UserResponse> = users
        .into_iter()
        .map(|user| UserResponse {
            id: user.id,
            email: user.email,
        })
        .collect();

    Ok(Json(json!({ "users": users })))
}

/// Provisions the caller's profile row. Safe to call repeatedly; an existing
/// profile is reported, not overwritten.
async fn create_profile_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    payload: Option<Json<CreateProfileRequest>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let (_, created) = services::create_profile_if_missing(
        &app_state.db_pool,
        authenticated_user.id,
        services::NewProfile {
            full_name: payload.full_name,
            phone: payload.phone,
            role: None,
        },
    )
    .await
    .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if created {
        Ok(Json(json!({ "success": true })))
    } else {
        Ok(Json(json!({ "success": true, "message": "Profile already exists" })))
    }
}

// --- Router ---

pub fn create_users_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(search_users_handler))
        .route("/profile", post(create_profile_handler))
}
