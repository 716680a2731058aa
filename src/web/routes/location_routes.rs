use axum::{
    extract::{Extension, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db::entities::location;
use crate::db::services;
use crate::web::models::AuthenticatedUser;
use crate::web::{AppError, AppState};

const ADMIN_ROLE: &str = "admin";

// --- Request/Response Structs ---

#[derive(Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
}

// --- Route Handlers ---

async fn list_locations_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let locations = services::get_all_locations(&app_state.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
    Ok(Json(json!({ "locations": locations })))
}

async fn create_location_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<location::Model>), AppError> {
    let profile = services::get_profile_by_user_id(&app_state.db_pool, authenticated_user.id)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if profile.map(|p| p.role) != Some(ADMIN_ROLE.to_string()) {
        return Err(AppError::Forbidden(
            "Admin access required".to_string(),
        ));
    }

    if payload.name.trim().is_empty() || payload.country.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Name and country are required".to_string(),
        ));
    }

    let created = services::create_location(
        &app_state.db_pool,
        &payload.name,
        &payload.country,
        payload.tags,
        &payload.description,
    )
    .await
    .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// --- Router ---

pub fn create_locations_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_locations_handler).post(create_location_handler))
}
