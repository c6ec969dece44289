//! Command implementations.

pub mod client;
pub mod config;

pub use client::run_client;
pub use config::{run_config, run_status};

use serde::Deserialize;

use crate::CliConfig;

/// API client for making requests to the Keycloak server.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

/// Error body returned by the admin API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    error_description: Option<String>,
}

impl ApiClient {
    /// Creates a new API client.
    pub fn new(config: &CliConfig, server_override: Option<&str>) -> crate::CliResult<Self> {
        let base_url = server_override
            .map(|s| s.to_string())
            .unwrap_or_else(|| config.server_url.clone());

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Makes a GET request and decodes a JSON body.
    pub async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> crate::CliResult<T> {
        let response = self.send_get(path).await?;
        response.json().await.map_err(crate::CliError::Http)
    }

    /// Makes a GET request and returns the body as text.
    pub async fn get_text(&self, path: &str) -> crate::CliResult<String> {
        let response = self.send_get(path).await?;
        response.text().await.map_err(crate::CliError::Http)
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_get(&self, path: &str) -> crate::CliResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        check_status(response).await
    }
}

/// Turns a non-success response into [`crate::CliError::Api`].
async fn check_status(response: reqwest::Response) -> crate::CliResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(crate::CliError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Extracts a readable message from an error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error_description.unwrap_or(parsed.error),
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.to_string(),
    }
}
