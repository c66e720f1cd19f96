//! HTTP client for the influencer search endpoint
//!
//! One operation: `POST /fetch_profiles` with a free-text query, answering
//! a JSON array of profiles. Non-2xx responses surface as
//! [`ApiError::Status`] with whatever message the body carries.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::model::InfluencerProfile;
use crate::services::error::ApiError;

/// Client for the influencer search API.
pub struct SearchClient {
    client: Client,
    base_url: String,
}

impl SearchClient {
    /// Create a client against `base_url` (no trailing slash required).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest` client cannot
    /// be constructed.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("scout-tui/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Run a natural-language profile search.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Status`] when the endpoint answers non-2xx.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] when the body is not a profile array.
    pub fn fetch_profiles(&self, query: &str) -> Result<Vec<InfluencerProfile>, ApiError> {
        let url = format!("{}/fetch_profiles", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "query": query }))
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: format!("fetch_profiles(query={query})"),
            source: e,
        })
    }
}
