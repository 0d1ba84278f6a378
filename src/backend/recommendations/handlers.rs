/**
 * Recommendation Handler
 *
 * GET /recommendations proxies to the recommendation service for the
 * logged-in user. Unlike the rest of the API, failures are reported as a
 * JSON object, which is what the recommendation widget expects.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::backend::middleware::AuthUser;
use crate::backend::recommendations::client::RecommendationClient;

/// GET /recommendations
pub async fn get_recommendations(
    user: AuthUser,
    State(client): State<RecommendationClient>,
) -> Response {
    match client.fetch(user.id).await {
        Ok(recommendations) => Json(recommendations).into_response(),
        Err(e) => {
            tracing::error!("Error fetching recommendations for user {}: {}", user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error fetching recommendations" })),
            )
                .into_response()
        }
    }
}
