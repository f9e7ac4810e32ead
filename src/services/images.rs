//! Pixabay image search for mood cover images.

use crate::errors::{AppResult, ServiceError};
use crate::services::{check_status, http_client};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
}

/// Client for the Pixabay image search API.
pub struct ImageSearchClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl ImageSearchClient {
    /// Creates a new image search client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Search endpoint (e.g., "https://pixabay.com/api/")
    /// * `api_key` - Pixabay API key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: http_client(),
        }
    }

    /// Returns the URL of the first large image matching `query`.
    ///
    /// Returns `Ok(None)` when the search has no hits.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The service is not reachable
    /// - The service answers with an error status
    /// - The response body cannot be parsed
    pub fn search(&self, query: &str) -> AppResult<Option<String>> {
        debug!("Searching images for query: {}", query);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("min_width", "1280"),
                ("min_height", "720"),
                ("image_type", "illustration"),
                ("category", "feelings"),
            ])
            .send()
            .map_err(ServiceError::Unreachable)?;

        let body: SearchResponse = check_status(response)?.json().map_err(|e| {
            ServiceError::InvalidResponse(format!("Failed to parse image search response: {}", e))
        })?;

        let url = body.hits.into_iter().next().map(|hit| hit.large_image_url);
        debug!("Image search found image: {}", url.is_some());
        Ok(url)
    }
}
