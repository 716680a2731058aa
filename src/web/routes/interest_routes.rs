use axum::{
    extract::{Extension, Path, Query, State},
    routing::{delete, post},
    Json, Router,
};
use sea_orm::DbErr;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::entities::location;
use crate::db::services;
use crate::web::models::AuthenticatedUser;
use crate::web::{AppError, AppState};

// --- Request/Response Structs ---

#[derive(Deserialize)]
pub struct CreateInterestRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub locations_id: Vec<Uuid>,
    /// Older clients submit a single location under this key.
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub custom_locations: Vec<String>,
    #[serde(default)]
    pub budget: i64,
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub activities: String,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ListInterestsQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
}

// --- Helpers ---

/// Builds the denormalized display string stored on the interest: resolved
/// rows as "Name, Country", free-text entries as given, joined with " | ".
fn compose_locations_text(locations: &[location::Model], custom_locations: &[String]) -> String {
    locations
        .iter()
        .map(|location| format!("{}, {}", location.name, location.country))
        .chain(
            custom_locations
                .iter()
                .map(|custom| custom.trim().to_string())
                .filter(|custom| !custom.is_empty()),
        )
        .collect::<Vec<_>>()
        .join(" | ")
}

fn is_foreign_key_violation(db_err: &DbErr) -> bool {
    if let DbErr::Query(sea_orm::RuntimeErr::SqlxError(sqlx_error_value)) = db_err {
        if let sqlx::Error::Database(database_error) = sqlx_error_value {
            return database_error.is_foreign_key_violation();
        }
    }
    false
}

// --- Route Handlers ---

async fn create_interest_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateInterestRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.user_id != authenticated_user.id {
        return Err(AppError::Forbidden(
            "Unauthorized: User ID mismatch".to_string(),
        ));
    }

    let mut locations_id = payload.locations_id;
    if let Some(single) = payload.location_id {
        if !locations_id.contains(&single) {
            locations_id.push(single);
        }
    }

    let has_custom = payload
        .custom_locations
        .iter()
        .any(|custom| !custom.trim().is_empty());
    if locations_id.is_empty() && !has_custom {
        return Err(AppError::InvalidInput(
            "At least one location is required".to_string(),
        ));
    }
    if payload.budget < 0 {
        return Err(AppError::InvalidInput(
            "Budget must not be negative".to_string(),
        ));
    }
    if payload.duration < 0 {
        return Err(AppError::InvalidInput(
            "Duration must not be negative".to_string(),
        ));
    }
    if payload.activities.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Activities must not be empty".to_string(),
        ));
    }

    let locations = services::get_locations_by_ids(&app_state.db_pool, &locations_id)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
    let locations_text = compose_locations_text(&locations, &payload.custom_locations);

    let new_interest = services::NewInterest {
        user_id: authenticated_user.id,
        locations_id,
        locations_text,
        budget: payload.budget,
        duration: payload.duration,
        activities: payload.activities,
        notes: payload.notes,
    };

    match services::create_interest(&app_state.db_pool, &new_interest).await {
        Ok(_) => Ok(Json(json!({ "success": true }))),
        Err(db_err) if is_foreign_key_violation(&db_err) => {
            // Accounts created before profile provisioning existed have no
            // profile row yet. Provision one and retry the insert once.
            warn!(
                user_id = %authenticated_user.id,
                "interest insert hit a missing profile row, provisioning and retrying"
            );
            services::create_profile_if_missing(
                &app_state.db_pool,
                authenticated_user.id,
                services::NewProfile::default(),
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

            services::create_interest(&app_state.db_pool, &new_interest)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
            Ok(Json(json!({ "success": true })))
        }
        Err(db_err) => Err(AppError::DatabaseError(db_err.to_string())),
    }
}

async fn list_interests_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ListInterestsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    if query.user_id != Some(authenticated_user.id) {
        return Err(AppError::Forbidden(
            "Unauthorized: User ID mismatch".to_string(),
        ));
    }

    let interests =
        services::get_interests_with_locations(&app_state.db_pool, authenticated_user.id)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(Json(json!({ "interests": interests })))
}

async fn delete_interest_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
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

    services::delete_interest_by_id(&app_state.db_pool, interest_id)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    info!(interest_id = %interest_id, user_id = %authenticated_user.id, "interest deleted");
    Ok(Json(json!({ "success": true })))
}

// --- Router ---

pub fn create_interests_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_interest_handler).get(list_interests_handler))
        .route("/{interest_id}", delete(delete_interest_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    /// The Postgres error an interest insert hits when the account has no
    /// profile row yet.
    #[derive(Debug)]
    struct MissingProfileRow;

    impl std::fmt::Display for MissingProfileRow {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "insert or update on table \"user_interests\" violates foreign key constraint"
            )
        }
    }

    impl std::error::Error for MissingProfileRow {}

    impl sqlx::error::DatabaseError for MissingProfileRow {
        fn message(&self) -> &str {
            "insert or update on table \"user_interests\" violates foreign key constraint"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::ForeignKeyViolation
        }
    }

    #[test]
    fn foreign_key_violations_are_classified() {
        let fk = DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(Box::new(
            MissingProfileRow,
        ))));
        assert!(is_foreign_key_violation(&fk));
    }

    #[test]
    fn other_database_errors_are_not_foreign_key_violations() {
        assert!(!is_foreign_key_violation(&DbErr::RecordNotUpdated));
        assert!(!is_foreign_key_violation(&DbErr::Query(
            RuntimeErr::Internal("connection reset".to_string())
        )));
    }

    fn location(name: &str, country: &str) -> location::Model {
        location::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            country: country.to_string(),
            tags: vec![],
            description: String::new(),
        }
    }

    #[test]
    fn locations_text_joins_resolved_and_custom_entries() {
        let locations = vec![location("Hanoi", "Vietnam"), location("Osaka", "Japan")];
        let custom = vec!["  Lofoten  ".to_string(), String::new()];
        assert_eq!(
            compose_locations_text(&locations, &custom),
            "Hanoi, Vietnam | Osaka, Japan | Lofoten"
        );
    }

    #[test]
    fn locations_text_handles_custom_only_interests() {
        assert_eq!(
            compose_locations_text(&[], &["Somewhere warm".to_string()]),
            "Somewhere warm"
        );
    }
}
