//! Integration source abstraction and Xcode Server client
//!
//! Provides a common trait for sources of integration test results and the
//! reqwest-backed implementation talking to the Xcode Server REST API.

use crate::error::{Error, Result};
use crate::test_results::TestResultsPayload;
use async_trait::async_trait;
use std::time::Duration;

/// Port the Xcode Server REST API listens on
const XCODE_SERVER_API_PORT: u16 = 20343;

/// Trait for anything that can produce raw test results for an integration
#[async_trait]
pub trait IntegrationSource: Send + Sync {
    /// Fetch the raw test-result payload for an integration
    async fn test_results(&self, integration_id: &str) -> Result<TestResultsPayload>;
}

/// Xcode Server REST API client
pub struct XcodeServerClient {
    api_url: String,
    http_client: reqwest::Client,
}

impl XcodeServerClient {
    /// Create a new client for the named server
    pub fn new(server_name: &str) -> Result<Self> {
        if server_name.is_empty() {
            return Err(Error::InvalidArgument(
                "server name must not be empty".to_string(),
            ));
        }

        let api_url = format!("https://{}:{}/api", server_name, XCODE_SERVER_API_PORT);

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("xcsbot")
            .build()
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self {
            api_url,
            http_client,
        })
    }

    /// Base URL of the server's REST API
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl IntegrationSource for XcodeServerClient {
    async fn test_results(&self, integration_id: &str) -> Result<TestResultsPayload> {
        let url = format!("{}/integrations/{}/test_results", self.api_url, integration_id);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Unavailable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(integration_id.to_string()));
        }

        if !response.status().is_success() {
            return Err(Error::Unavailable(format!(
                "server returned {} for {}",
                response.status(),
                url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Unavailable(e.to_string()))?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = XcodeServerClient::new("build.example.com");
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_empty_server() {
        let client = XcodeServerClient::new("");
        assert!(matches!(client, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_api_url() {
        let client = XcodeServerClient::new("build.example.com").unwrap();
        assert_eq!(client.api_url(), "https://build.example.com:20343/api");
    }
}
