/**
 * Recommendation Service Client
 *
 * Thin HTTP client for the external recommendation service. The service
 * answers `GET /recommendations?user_id=<id>` with arbitrary JSON, which is
 * relayed to the caller untouched.
 */

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure talking to the recommendation service
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("recommendation service returned {status}: {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Clone)]
pub struct RecommendationClient {
    client: Client,
    base_url: String,
}

impl RecommendationClient {
    /// Build a client for the service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch recommendations for one user
    pub async fn fetch(&self, user_id: i64) -> Result<Value, RecommendationError> {
        let url = format!("{}/recommendations", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(RecommendationError::Upstream { status, body });
        }

        Ok(response.json::<Value>().await?)
    }
}
