/**
 * Chatbot Handlers
 *
 * # Endpoints
 *
 * - `POST /api/chat` - `{message}` → `{reply}`
 * - `GET /api/chat/health` - Whether the language model fallback is active
 *
 * # Reply Order
 *
 * 1. Invalid or empty message → 400 with a fixed reply
 * 2. Over 500 characters → 200 with a fixed reply
 * 3. FAQ topic match
 * 4. Language model, if configured and its answer is usable
 * 5. A random fallback reply
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::chatbot::ai::AiClient;
use crate::backend::chatbot::matcher::{fallback_reply, smart_reply};

pub const MAX_MESSAGE_CHARS: usize = 500;

const INVALID_MESSAGE: &str = "Please send a valid message.";
const MESSAGE_TOO_LONG: &str = "Your message is too long. Please keep it under 500 characters.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Kept loose so that non-string messages get the friendly reply
    pub message: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatHealth {
    pub status: String,
    pub api_key_configured: bool,
    pub mode: String,
    pub timestamp: String,
}

fn reply(status: StatusCode, text: impl Into<String>) -> (StatusCode, Json<ChatReply>) {
    (status, Json(ChatReply { reply: text.into() }))
}

/// POST /api/chat
pub async fn chat(
    State(ai): State<AiClient>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatReply>) {
    let message = match payload {
        Ok(Json(ChatRequest {
            message: Some(Value::String(message)),
        })) if !message.trim().is_empty() => message,
        Ok(_) => return reply(StatusCode::BAD_REQUEST, INVALID_MESSAGE),
        Err(rejection) => {
            tracing::debug!("Rejected chat payload: {}", rejection);
            return reply(StatusCode::BAD_REQUEST, INVALID_MESSAGE);
        }
    };

    if message.chars().count() > MAX_MESSAGE_CHARS {
        return reply(StatusCode::OK, MESSAGE_TOO_LONG);
    }

    if let Some(answer) = smart_reply(&message) {
        tracing::debug!("Chat answered by pattern matching");
        return reply(StatusCode::OK, answer);
    }

    match ai.generate(&message).await {
        Ok(Some(answer)) => {
            tracing::debug!("Chat answered by the language model");
            return reply(StatusCode::OK, answer);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Language model request failed: {}", e),
    }

    reply(StatusCode::OK, fallback_reply())
}

/// GET /api/chat/health
pub async fn health(State(ai): State<AiClient>) -> Json<ChatHealth> {
    let configured = ai.is_configured();
    Json(ChatHealth {
        status: "ready".to_string(),
        api_key_configured: configured,
        mode: if configured {
            "smart_matching + ai_fallback"
        } else {
            "smart_matching_only"
        }
        .to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
