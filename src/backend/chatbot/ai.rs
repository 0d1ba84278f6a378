/**
 * Language Model Fallback
 *
 * When no FAQ topic matches and an API key is configured, the message is
 * sent to a hosted text-generation model. The answer is accepted only if
 * the first generated line is longer than 10 characters after the role
 * prefix is removed.
 */

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_NEW_TOKENS: u32 = 50;
const TEMPERATURE: f32 = 0.8;
const MIN_REPLY_LEN: usize = 10;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model returned {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Serialize)]
struct GenerationRequest {
    inputs: String,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: Option<String>,
}

/// Client for the hosted text-generation model
#[derive(Debug, Clone)]
pub struct AiClient {
    client: Client,
    model_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl AiClient {
    pub fn new(client: Client, model_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client,
            model_url: model_url.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
            timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask the model; `Ok(None)` when it is not configured or its answer
    /// is unusable
    pub async fn generate(&self, message: &str) -> Result<Option<String>, AiError> {
        let Some(api_key) = &self.api_key else {
            return Ok(None);
        };

        let body = GenerationRequest {
            inputs: prompt(message),
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(&self.model_url)
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AiError::Status(response.status()));
        }

        let generations = response.json::<Vec<Generation>>().await?;
        Ok(generations
            .into_iter()
            .next()
            .and_then(|generation| generation.generated_text)
            .and_then(|text| clean_reply(&text)))
    }
}

fn prompt(message: &str) -> String {
    format!("Library Assistant helping users find books.\nUser: {}\nAssistant:", message)
}

/// First line of the generated text without a leading role prefix
pub fn clean_reply(text: &str) -> Option<String> {
    let text = text.trim();
    let text = ["assistant:", "user:"]
        .iter()
        .find_map(|prefix| {
            text.get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .map(|_| &text[prefix.len()..])
        })
        .unwrap_or(text)
        .trim();
    let first_line = text.lines().next().unwrap_or("");
    (first_line.chars().count() > MIN_REPLY_LEN).then(|| first_line.to_string())
}
