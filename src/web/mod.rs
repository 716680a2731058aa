use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::publish::PublishService;
use crate::search::client::RecommendClient;
use crate::search::session::SearchSessions;
use crate::server::config::ServerConfig;
use crate::services::auth_service;
use crate::web::{
    error::AppError,
    middleware::auth,
    models::{LoginRequest, RegisterRequest},
    routes::*,
};

pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

pub struct AppState {
    pub db_pool: DatabaseConnection,
    pub config: Arc<ServerConfig>,
    pub recommend: Arc<RecommendClient>,
    pub search_sessions: SearchSessions,
    pub publish_service: Arc<PublishService>,
}

// --- Auth Handlers ---

async fn register_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<models::UserResponse>, AppError> {
    match auth_service::register_user(&app_state.db_pool, payload).await {
        Ok(user_response) => Ok(Json(user_response)),
        Err(e) => Err(e),
    }
}

async fn login_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let login_response =
        auth_service::login_user(&app_state.db_pool, payload, &app_state.config.jwt_secret).await?;

    let auth_cookie = Cookie::build(("token", login_response.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(true)
        .build();

    let mut response = Json(login_response).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        auth_cookie
            .to_string()
            .parse()
            .map_err(|_| AppError::InternalServerError("Invalid cookie value".to_string()))?,
    );

    Ok(response)
}

async fn logout_handler() -> Result<impl IntoResponse, AppError> {
    let expired_cookie = Cookie::build(("token", ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(true)
        .max_age(time::Duration::ZERO)
        .build();

    let mut response = Json(serde_json::json!({ "success": true })).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        expired_cookie
            .to_string()
            .parse()
            .map_err(|_| AppError::InternalServerError("Invalid cookie value".to_string()))?,
    );

    Ok(response)
}

async fn health_check_handler() -> &'static str {
    "OK"
}

// --- Router ---

pub fn create_axum_router(db_pool: DatabaseConnection, config: Arc<ServerConfig>) -> Router {
    let app_state = Arc::new(AppState {
        db_pool,
        recommend: Arc::new(RecommendClient::new(config.recommend_api_url.clone())),
        search_sessions: SearchSessions::new(),
        publish_service: Arc::new(PublishService::new()),
        config,
    });

    let cors = match app_state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => {
            warn!(
                frontend_url = %app_state.config.frontend_url,
                "frontend_url is not a valid origin, cross-origin requests are disabled"
            );
            CorsLayer::new()
        }
    }
    .allow_methods(vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
    .allow_credentials(true);

    Router::new()
        .route("/api/health", get(health_check_handler))
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route(
            "/api/auth/logout",
            post(logout_handler).route_layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth::auth,
            )),
        )
        .route(
            "/api/auth/me",
            get(auth_service::me).route_layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth::auth,
            )),
        )
        .nest(
            "/api/locations",
            location_routes::create_locations_router().route_layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth::auth),
            ),
        )
        .nest(
            "/api/interests",
            interest_routes::create_interests_router().route_layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth::auth),
            ),
        )
        .nest(
            "/api/packages",
            package_routes::create_packages_router().route_layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth::auth),
            ),
        )
        .nest(
            "/api/dashboard",
            dashboard_routes::create_dashboard_router().route_layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth::auth),
            ),
        )
        .nest(
            "/api/users",
            user_routes::create_users_router().route_layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth::auth,
            )),
        )
        .nest("/api", search_routes::create_search_proxy_router())
        .with_state(app_state.clone())
        .layer(cors)
}
