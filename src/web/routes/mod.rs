pub mod dashboard_routes;
pub mod interest_routes;
pub mod location_routes;
pub mod package_routes;
pub mod search_routes;
pub mod user_routes;
