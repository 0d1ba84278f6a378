/**
 * Chat Route Handlers
 *
 * Routes of the FAQ chatbot. They live under `/api` and are public.
 *
 * # Routes
 *
 * - `POST /api/chat` - Ask the chatbot
 * - `GET /api/chat/health` - Chatbot mode and readiness
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::chatbot;
use crate::backend::server::state::AppState;

/// Configure chatbot routes
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/chat", post(chatbot::chat))
        .route("/api/chat/health", get(chatbot::health))
}
