use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::services;
use crate::publish::PackageListing;
use crate::search::models::SearchPackagesParams;
use crate::search::normalize;
use crate::search::presenter::{self, ResultsView};
use crate::web::models::{AuthenticatedUser, SessionToken};
use crate::web::{AppError, AppState};

// --- Request/Response Structs ---

#[derive(Deserialize)]
pub struct ResultsQuery {
    pub page: Option<usize>,
    pub view: Option<String>,
}

#[derive(Deserialize)]
pub struct PublishResultRequest {
    pub channel: String,
}

// --- Route Handlers ---

/// Dispatches a recommendation search for one interest. The session keeps
/// whatever was previously committed for that interest until the new result
/// set arrives, and the in-flight indicator is cleared on a timer either
/// way.
async fn dispatch_search_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    Extension(session_token): Extension<SessionToken>,
    State(app_state): State<Arc<AppState>>,
    Path(interest_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let interest = services::get_interest_by_id(&app_state.db_pool, interest_id)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Interest not found".to_string()))?;

    if interest.user_id != authenticated_user.id {
        return Err(AppError::Forbidden(
            "Unauthorized: Not your interest".to_string(),
        ));
    }

    app_state.search_sessions.begin_search(
        authenticated_user.id,
        interest_id,
        &interest.locations_text,
    );

    let params = SearchPackagesParams::from_interest(&interest);
    match app_state
        .recommend
        .search_travel_packages(&session_token.0, &params)
        .await
    {
        Ok(mut packages) => {
            normalize::mark_ai_suggestion(&mut packages);
            app_state.search_sessions.commit_results(
                authenticated_user.id,
                interest_id,
                &interest.locations_text,
                packages.clone(),
            );
            app_state
                .search_sessions
                .schedule_indicator_clear(authenticated_user.id, interest_id);

            info!(
                interest_id = %interest_id,
                count = packages.len(),
                "search committed"
            );
            Ok(Json(json!({ "packages": packages })))
        }
        Err(err) => {
            warn!(
                interest_id = %interest_id,
                error = %err,
                "search failed, previous results kept"
            );
            app_state
                .search_sessions
                .schedule_indicator_clear(authenticated_user.id, interest_id);
            Err(err.into())
        }
    }
}

async fn list_results_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<presenter::ResultsResponse>, AppError> {
    let view = ResultsView::from_query(query.view.as_deref(), query.page);
    let snapshot = app_state.search_sessions.snapshot(authenticated_user.id);
    Ok(Json(presenter::present_results(snapshot, view)))
}

async fn interest_results_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path(interest_id): Path<Uuid>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<presenter::ResultGroup>, AppError> {
    let view = ResultsView::from_query(query.view.as_deref(), query.page);
    let group = app_state
        .search_sessions
        .results_for(authenticated_user.id, interest_id)
        .ok_or_else(|| AppError::NotFound("No search results for this interest".to_string()))?;
    Ok(Json(presenter::present_single(group, view)))
}

/// Detail expansion is served from the session result map; the package is
/// never refetched from anywhere.
async fn package_detail_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path((interest_id, package_id)): Path<(Uuid, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let package = app_state
        .search_sessions
        .package(authenticated_user.id, interest_id, &package_id)
        .ok_or_else(|| AppError::NotFound("Package not found in results".to_string()))?;
    Ok(Json(json!(package)))
}

async fn publish_result_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path((interest_id, package_id)): Path<(Uuid, String)>,
    Json(payload): Json<PublishResultRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let group = app_state
        .search_sessions
        .results_for(authenticated_user.id, interest_id)
        .ok_or_else(|| AppError::NotFound("No search results for this interest".to_string()))?;
    let package = group
        .packages
        .iter()
        .find(|package| package.id == package_id)
        .ok_or_else(|| AppError::NotFound("Package not found in results".to_string()))?;

    let listing = PackageListing::from_package(package, Some(group.locations_text.clone()));
    let outcome = app_state
        .publish_service
        .publish(&payload.channel, &listing)
        .await?;

    Ok(Json(json!(outcome)))
}

/// Interest deletion does not cascade into the session store, so clients
/// call this afterwards to drop the now-orphaned result group.
async fn discard_results_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path(interest_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = app_state
        .search_sessions
        .discard_results(authenticated_user.id, interest_id);
    Ok(Json(json!({ "success": true, "removed": removed })))
}

// --- Router ---

pub fn create_dashboard_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search/{interest_id}", post(dispatch_search_handler))
        .route("/results", get(list_results_handler))
        .route(
            "/results/{interest_id}",
            get(interest_results_handler).delete(discard_results_handler),
        )
        .route(
            "/results/{interest_id}/packages/{package_id}",
            get(package_detail_handler),
        )
        .route(
            "/results/{interest_id}/packages/{package_id}/publish",
            post(publish_result_handler),
        )
}
