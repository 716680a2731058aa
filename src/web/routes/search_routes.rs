use axum::{
    extract::State,
    http::{header, HeaderMap},
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::search::models::{Package, SuggestTourParams};
use crate::web::{AppError, AppState};

// These routes sit outside the session middleware on purpose: callers
// authenticate against the recommendation service itself, and the raw
// bearer is forwarded without being checked against a local account.

// --- Helpers ---

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token is required".to_string()))?;
    Ok(value.strip_prefix("Bearer ").unwrap_or(value))
}

// --- Route Handlers ---

async fn search_packages_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Vec<Package>>, AppError> {
    let token = bearer_token(&headers)?;
    let packages = app_state
        .recommend
        .search_travel_packages(token, &body)
        .await?;
    Ok(Json(packages))
}

async fn suggest_tour_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(params): Json<SuggestTourParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = bearer_token(&headers)?;
    let packages = app_state.recommend.suggest_tour(token, &params).await?;
    Ok(Json(json!({ "packages": packages })))
}

// --- Router ---

pub fn create_search_proxy_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search-packages", post(search_packages_handler))
        .route("/suggest-tour", post(suggest_tour_handler))
}
