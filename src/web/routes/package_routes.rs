use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::DbErr;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::entities::travel_package;
use crate::db::services;
use crate::publish::PackageListing;
use crate::search::models::Package;
use crate::web::models::AuthenticatedUser;
use crate::web::{AppError, AppState};

// --- Request/Response Structs ---

#[derive(Deserialize)]
pub struct PackageRequest {
    pub title: String,
    pub location_id: Option<Uuid>,
    pub price: f64,
    pub duration_days: i32,
    /// When absent, highlights are derived from the description markers.
    pub highlights: Option<Vec<String>>,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct PublishRequest {
    pub channel: String,
}

// --- Helpers ---

/// Derives the highlights list from the description: one entry per
/// paragraph starting with the `◯` marker, marker stripped and trimmed.
fn highlights_from_description(description: &str) -> Vec<String> {
    description
        .split("\n\n")
        .filter(|paragraph| paragraph.trim().starts_with('◯'))
        .map(|paragraph| paragraph.replacen('◯', "", 1).trim().to_string())
        .collect()
}

fn validated_new_package(payload: PackageRequest) -> Result<services::NewPackage, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title is required".to_string()));
    }
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(AppError::InvalidInput(
            "Price must not be negative".to_string(),
        ));
    }
    if payload.duration_days < 1 {
        return Err(AppError::InvalidInput(
            "Duration must be at least one day".to_string(),
        ));
    }

    let highlights = payload
        .highlights
        .unwrap_or_else(|| highlights_from_description(&payload.description));

    Ok(services::NewPackage {
        location_id: payload.location_id,
        title: payload.title,
        price: payload.price,
        duration_days: payload.duration_days,
        highlights,
        description: payload.description,
        image_url: payload.image_url,
    })
}

async fn locations_text_for(
    app_state: &AppState,
    location_id: Option<Uuid>,
) -> Result<Option<String>, AppError> {
    let Some(location_id) = location_id else {
        return Ok(None);
    };
    let locations = services::get_locations_by_ids(&app_state.db_pool, &[location_id])
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
    Ok(locations
        .first()
        .map(|location| format!("{}, {}", location.name, location.country)))
}

// --- Route Handlers ---

async fn create_package_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<PackageRequest>,
) -> Result<(StatusCode, Json<travel_package::Model>), AppError> {
    let new_package = validated_new_package(payload)?;
    let created = services::create_package(&app_state.db_pool, authenticated_user.id, new_package)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_package_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path(package_id): Path<Uuid>,
    Json(payload): Json<PackageRequest>,
) -> Result<Json<travel_package::Model>, AppError> {
    let new_package = validated_new_package(payload)?;
    let updated = services::update_package(
        &app_state.db_pool,
        package_id,
        authenticated_user.id,
        new_package,
    )
    .await
    .map_err(|db_err| match db_err {
        DbErr::RecordNotUpdated => {
            AppError::NotFound("Package not found or permission denied".to_string())
        }
        other => AppError::DatabaseError(other.to_string()),
    })?;
    Ok(Json(updated))
}

async fn delete_package_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path(package_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let delete_result =
        services::delete_package(&app_state.db_pool, package_id, authenticated_user.id)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if delete_result.rows_affected > 0 {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound(
            "Package not found or permission denied".to_string(),
        ))
    }
}

async fn random_packages_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let packages = services::get_random_packages(&app_state.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
    Ok(Json(json!({ "packages": packages })))
}

async fn trending_packages_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let packages = services::get_trending_packages(&app_state.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
    Ok(Json(json!({ "packages": packages })))
}

async fn proposed_packages_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let packages = services::get_proposed_packages(&app_state.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
    Ok(Json(json!({ "packages": packages })))
}

async fn publish_package_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path(package_id): Path<Uuid>,
    Json(payload): Json<PublishRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let package = services::get_package_by_id(&app_state.db_pool, package_id)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

    if package.provider_id != authenticated_user.id {
        return Err(AppError::Forbidden(
            "Unauthorized: Not your package".to_string(),
        ));
    }

    let locations_text = locations_text_for(&app_state, package.location_id).await?;
    let listing = PackageListing::from_package(&Package::from(package), locations_text);
    let outcome = app_state
        .publish_service
        .publish(&payload.channel, &listing)
        .await?;

    Ok(Json(json!(outcome)))
}

// --- Router ---

pub fn create_packages_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_package_handler))
        .route("/random", get(random_packages_handler))
        .route("/trending", get(trending_packages_handler))
        .route("/proposed", get(proposed_packages_handler))
        .route(
            "/{package_id}",
            put(update_package_handler).delete(delete_package_handler),
        )
        .route("/{package_id}/publish", post(publish_package_handler))
}
