use reqwest::{Client, header};
use serde::Serialize;
use thiserror::Error;

use super::models::Package;
use super::normalize::{self, NormalizeError};

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Recommendation service returned {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error(transparent)]
    UnexpectedResponse(#[from] NormalizeError),
}

/// Typed client for the external recommendation service. No timeout is set
/// here; the reqwest default applies.
pub struct RecommendClient {
    base_url: String,
    client: Client,
}

impl RecommendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Calls the package-matching endpoint. The body is any serializable
    /// parameter set; the endpoint tolerates partial payloads.
    pub async fn search_travel_packages<B: Serialize>(
        &self,
        token: &str,
        params: &B,
    ) -> Result<Vec<Package>, RecommendError> {
        self.post_for_packages("search-travel-packages", token, params)
            .await
    }

    /// Calls the tour-suggestion endpoint.
    pub async fn suggest_tour<B: Serialize>(
        &self,
        token: &str,
        params: &B,
    ) -> Result<Vec<Package>, RecommendError> {
        self.post_for_packages("suggest-tour", token, params).await
    }

    async fn post_for_packages<B: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<Vec<Package>, RecommendError> {
        let bearer = format!("Bearer {token}");
        // The service reads credentials from a query parameter in addition to
        // the header; both are sent to match what it was deployed against.
        let url = format!(
            "{}/{}?authorization={}",
            self.base_url,
            path,
            urlencoding::encode(&bearer)
        );

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, &bearer)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            let message = serde_json::from_str::<serde_json::Value>(&error_body)
                .ok()
                .and_then(|value| {
                    value
                        .get("error")
                        .or_else(|| value.get("detail"))
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or(error_body);
            return Err(RecommendError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let payload = response.json::<serde_json::Value>().await?;
        Ok(normalize::extract_packages(payload)?)
    }
}
