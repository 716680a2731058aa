//! Simulated publishing of travel packages to social channels.
//!
//! Nothing here talks to a real network. Each channel renders the package
//! into the message it would post and hands the preview back to the caller.

pub mod models;
pub mod senders;
pub mod service;

pub use models::{PackageListing, PublishOutcome};
pub use senders::{ChannelPublisher, PublishError};
pub use service::PublishService;
