use serde::Serialize;

use crate::search::models::Package;

/// The channel-independent view of a package being published. Built once by
/// the caller so every channel renders the same fields.
#[derive(Debug, Clone, Serialize)]
pub struct PackageListing {
    pub title: String,
    pub price: f64,
    pub duration_days: i32,
    pub highlights: Vec<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations_text: Option<String>,
}

impl PackageListing {
    pub fn from_package(package: &Package, locations_text: Option<String>) -> Self {
        Self {
            title: package.title.clone(),
            price: package.price,
            duration_days: package.duration_days,
            highlights: package.highlights.clone(),
            description: package.description.clone(),
            locations_text,
        }
    }
}

/// What a publish call reports back. `simulated` is always true; no channel
/// implementation performs a real delivery.
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
    pub channel: String,
    pub preview: String,
    pub simulated: bool,
}
