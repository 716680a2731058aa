use serde_json::Value;
use thiserror::Error;

use super::models::Package;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Response shape not recognized: expected an array or an object with a 'packages', 'data' or 'suggestions' array, got {0}")]
    UnexpectedShape(String),
    #[error("Response package could not be decoded: {0}")]
    InvalidPackage(#[from] serde_json::Error),
}

// Keys the recommendation service has been observed nesting its array under,
// in lookup order.
const ARRAY_KEYS: [&str; 3] = ["packages", "data", "suggestions"];

/// Normalizes a recommendation-service response into a package list.
///
/// The service does not fix its envelope: depending on endpoint and version
/// it returns `{"packages": [...]}`, `{"data": [...]}`, `{"suggestions":
/// [...]}` or a bare array. All four decode to the same `Vec<Package>`. A
/// key holding a non-array value is skipped in favor of the next candidate.
/// Anything else is an `UnexpectedShape` error rather than an empty success,
/// so a changed upstream contract fails loudly.
pub fn extract_packages(value: Value) -> Result<Vec<Package>, NormalizeError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(ref map) => ARRAY_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array).cloned())
            .ok_or_else(|| NormalizeError::UnexpectedShape(describe(&value)))?,
        other => return Err(NormalizeError::UnexpectedShape(describe(&other))),
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(NormalizeError::from))
        .collect()
}

/// Flags the last package as algorithmically generated. This is a display
/// convention carried over from the dashboard, not something the service
/// asserts; it lives here so a backend-provided flag could replace it in one
/// place.
pub fn mark_ai_suggestion(packages: &mut [Package]) {
    if let Some(last) = packages.last_mut() {
        last.is_ai_generated = Some(true);
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "an array".to_string(),
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("an object with keys [{}]", keys.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!([
            {"id": "p1", "title": "Old Quarter walking tour", "price": 120.0, "duration_days": 1},
            {"id": "p2", "title": "Ha Long Bay cruise", "price": 450.0, "duration_days": 3}
        ])
    }

    #[test]
    fn unwraps_packages_key() {
        let result = extract_packages(json!({"packages": sample()})).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "p1");
    }

    #[test]
    fn unwraps_data_key() {
        let result = extract_packages(json!({"data": sample()})).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn unwraps_suggestions_key() {
        let result = extract_packages(json!({"suggestions": sample()})).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn accepts_a_bare_array() {
        let result = extract_packages(sample()).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].title, "Ha Long Bay cruise");
    }

    #[test]
    fn all_envelopes_normalize_to_the_same_list() {
        let bare = extract_packages(sample()).unwrap();
        let packages = extract_packages(json!({"packages": sample()})).unwrap();
        let data = extract_packages(json!({"data": sample()})).unwrap();
        assert_eq!(bare, packages);
        assert_eq!(bare, data);
    }

    #[test]
    fn null_under_one_key_falls_through_to_the_next() {
        let result = extract_packages(json!({"packages": null, "data": sample()})).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn unknown_object_shape_is_an_error() {
        let err = extract_packages(json!({"results": sample()})).unwrap_err();
        assert!(matches!(err, NormalizeError::UnexpectedShape(_)));
        assert!(err.to_string().contains("results"));
    }

    #[test]
    fn scalar_response_is_an_error() {
        let err = extract_packages(json!("ok")).unwrap_err();
        assert!(matches!(err, NormalizeError::UnexpectedShape(_)));
    }

    #[test]
    fn malformed_package_element_is_an_error() {
        let err = extract_packages(json!({"packages": ["not-a-package"]})).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidPackage(_)));
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let result = extract_packages(json!([{"title": "Mystery tour"}])).unwrap();
        assert_eq!(result[0].price, 0.0);
        assert!(result[0].highlights.is_empty());
    }

    #[test]
    fn marks_only_the_last_package() {
        let mut packages = extract_packages(sample()).unwrap();
        mark_ai_suggestion(&mut packages);
        assert_eq!(packages[0].is_ai_generated, None);
        assert_eq!(packages[1].is_ai_generated, Some(true));
    }

    #[test]
    fn marking_an_empty_list_is_a_no_op() {
        let mut packages: Vec<Package> = Vec::new();
        mark_ai_suggestion(&mut packages);
        assert!(packages.is_empty());
    }
}
