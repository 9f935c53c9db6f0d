// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_millis(config.timeout_ms))
        .build()?;
    Ok(client)
}

/// Fetch a page and return its body as text.
///
/// A non-2xx status is an error carrying the status code and reason phrase.
/// No retries happen at this layer.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::status(url, status));
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        assert!(create_client(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn test_status_error_carries_reason() {
        let err = AppError::status("https://example.edu/x.html", reqwest::StatusCode::NOT_FOUND);
        let message = err.to_string();
        assert!(message.contains("404 Not Found"));
        assert!(message.contains("https://example.edu/x.html"));
    }
}
