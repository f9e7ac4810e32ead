//! Clients for the external services used while writing.
//!
//! - `images`: cover image search for a mood
//! - `prompts`: the daily writing prompt
//!
//! Both are thin blocking HTTP clients. Callers decide how to degrade when a
//! service is unavailable.

pub mod images;
pub mod prompts;

pub use images::ImageSearchClient;
pub use prompts::PromptClient;

use crate::constants::HTTP_TIMEOUT_SECS;
use crate::errors::{AppResult, ServiceError};
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// Builds the HTTP client shared by the service clients.
fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Turns a non-success status into `ServiceError::InvalidResponse`.
fn check_status(response: Response) -> AppResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_text = response.text().unwrap_or_default();
    Err(ServiceError::InvalidResponse(format!("HTTP {}: {}", status, error_text)).into())
}
