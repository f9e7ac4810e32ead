//! Advice Slip client used for the daily writing prompt.

use crate::errors::{AppResult, ServiceError};
use crate::services::{check_status, http_client};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct AdviceResponse {
    slip: Slip,
}

#[derive(Debug, Deserialize)]
struct Slip {
    advice: String,
}

/// Client for the daily prompt service.
pub struct PromptClient {
    url: String,
    client: Client,
}

impl PromptClient {
    /// Creates a new prompt client for the given endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: http_client(),
        }
    }

    /// Fetches a fresh prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable, answers with an error
    /// status, or returns an empty or malformed slip.
    pub fn fetch_prompt(&self) -> AppResult<String> {
        debug!("Fetching daily prompt");

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(ServiceError::Unreachable)?;

        let body: AdviceResponse = check_status(response)?.json().map_err(|e| {
            ServiceError::InvalidResponse(format!("Failed to parse prompt response: {}", e))
        })?;

        let advice = body.slip.advice.trim().to_string();
        if advice.is_empty() {
            return Err(ServiceError::InvalidResponse("Empty prompt".to_string()).into());
        }
        Ok(advice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_fetch_prompt() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/advice")
            .with_status(200)
            .with_body(r#"{"slip": {"id": 42, "advice": "Write it down. "}}"#)
            .create();

        let client = PromptClient::new(format!("{}/advice", server.url()));
        assert_eq!(client.fetch_prompt().unwrap(), "Write it down.");
        mock.assert();
    }

    #[test]
    fn test_fetch_prompt_malformed_body() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/advice")
            .with_status(200)
            .with_body(r#"{"message": {"type": "error"}}"#)
            .create();

        let client = PromptClient::new(format!("{}/advice", server.url()));
        assert!(matches!(
            client.fetch_prompt(),
            Err(AppError::Service(ServiceError::InvalidResponse(_)))
        ));
    }

    #[test]
    fn test_fetch_prompt_empty_advice() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/advice")
            .with_status(200)
            .with_body(r#"{"slip": {"id": 1, "advice": "   "}}"#)
            .create();

        let client = PromptClient::new(format!("{}/advice", server.url()));
        assert!(client.fetch_prompt().is_err());
    }

    #[test]
    fn test_fetch_prompt_unreachable() {
        let client = PromptClient::new("http://127.0.0.1:1/advice");
        assert!(matches!(
            client.fetch_prompt(),
            Err(AppError::Service(ServiceError::Unreachable(_)))
        ));
    }
}
