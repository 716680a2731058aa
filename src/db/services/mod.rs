//! The `services` module provides a high-level API for interacting with the database.
//! It encapsulates all the query logic and data access patterns, allowing the rest of
//! the application (HTTP handlers, the search dispatcher) to work with domain models
//! without needing to know about the underlying database schema or queries.
//!
//! This module is organized into sub-modules, each responsible for a specific
//! domain entity (locations, interests, packages, users). All public functions
//! from these sub-modules are re-exported here for convenient access under the
//! `crate::db::services::` path.

// Declare the sub-modules for each service area.
pub mod interest_service;
pub mod location_service;
pub mod package_service;
pub mod user_service;

// Re-export all public functions and structs from the sub-modules
// to make them accessible directly under `crate::db::services::*`.
pub use interest_service::*;
pub use location_service::*;
pub use package_service::*;
pub use user_service::*;
