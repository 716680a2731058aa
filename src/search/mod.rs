//! Interest-to-package search: the typed client for the external
//! recommendation service, response normalization, and the per-session
//! result state the dashboard reads from.

pub mod client;
pub mod models;
pub mod normalize;
pub mod presenter;
pub mod session;
