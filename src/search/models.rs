use serde::{Deserialize, Serialize};

use crate::db::entities::{proposed_travel_package, travel_package, user_interest};

/// How many packages a search asks the recommendation service for.
pub const MATCH_COUNT: u32 = 3;

// The service expects tier hints even when the interest form never asked for
// them; these mirror what the dashboard always sent.
const DEFAULT_BUDGET_TIER: &str = "mid-range";
const DEFAULT_ACCOMMODATION: &str = "standard";
const DEFAULT_BUDGET_RANGE: &str = "$500-$1000";

/// A travel package as it crosses the wire. Search-generated packages carry
/// loose ids (not necessarily UUIDs) and only `isAIGenerated` when the flag
/// was set, so catalog matches serialize without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub duration_days: i32,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(
        rename = "isAIGenerated",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_ai_generated: Option<bool>,
}

impl From<travel_package::Model> for Package {
    fn from(model: travel_package::Model) -> Self {
        Package {
            id: model.id.to_string(),
            title: model.title,
            provider_id: Some(model.provider_id.to_string()),
            location_id: model.location_id.map(|id| id.to_string()),
            price: model.price,
            duration_days: model.duration_days,
            highlights: model.highlights,
            description: model.description,
            image_url: model.image_url,
            is_ai_generated: None,
        }
    }
}

impl From<proposed_travel_package::Model> for Package {
    fn from(model: proposed_travel_package::Model) -> Self {
        Package {
            id: model.id.to_string(),
            title: model.title,
            provider_id: Some(model.provider_id.to_string()),
            location_id: model.location_id.map(|id| id.to_string()),
            price: model.price,
            duration_days: model.duration_days,
            highlights: model.highlights,
            description: model.description,
            image_url: model.image_url,
            is_ai_generated: None,
        }
    }
}

/// Request body for `POST /search-travel-packages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPackagesParams {
    pub location_input: String,
    pub budget_input: String,
    pub accommodation_input: String,
    pub activities_input: String,
    pub num_participants: u32,
    pub preferred_activities: String,
    pub accommodation_preference: String,
    pub budget_range: String,
    pub duration_adjustment: String,
    pub match_count: u32,
    pub num_suggestions: u32,
}

impl SearchPackagesParams {
    /// Builds the search body from a saved interest: location text verbatim,
    /// budget and duration rendered the way the service expects them, and
    /// the fixed result-count hint.
    pub fn from_interest(interest: &user_interest::Model) -> Self {
        let budget_range = if interest.budget > 0 {
            format!("${}", interest.budget)
        } else {
            DEFAULT_BUDGET_RANGE.to_string()
        };

        SearchPackagesParams {
            location_input: interest.locations_text.clone(),
            budget_input: DEFAULT_BUDGET_TIER.to_string(),
            accommodation_input: DEFAULT_ACCOMMODATION.to_string(),
            activities_input: interest.activities.clone(),
            num_participants: 1,
            preferred_activities: interest.activities.clone(),
            accommodation_preference: DEFAULT_ACCOMMODATION.to_string(),
            budget_range,
            duration_adjustment: format!("around {} days", interest.duration),
            match_count: MATCH_COUNT,
            num_suggestions: MATCH_COUNT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TourPreferences {
    pub budget_range: String,
    pub duration_preference: String,
    pub activity_types: Vec<String>,
}

/// Request body for `POST /suggest-tour`. Partial payloads are accepted:
/// missing preferences default to empty and the suggestion count falls back
/// to the fixed hint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestTourParams {
    pub location_id: String,
    #[serde(default)]
    pub user_preferences: TourPreferences,
    #[serde(default = "default_num_suggestions")]
    pub num_suggestions: u32,
}

fn default_num_suggestions() -> u32 {
    MATCH_COUNT
}
