//! Contact-form routes.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use parkflex_db::CustomerQueryRepository;

/// Creates the customer-query router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/customer-query/register", post(register_query))
}

/// Contact-form submission body.
#[derive(Debug, Deserialize)]
struct CustomerQueryRequest {
    name: String,
    email: String,
    message: String,
}

/// POST /customer-query/register - Record a contact-form submission.
async fn register_query(
    State(state): State<AppState>,
    Json(payload): Json<CustomerQueryRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.message.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": "name, email and message are required"
            })),
        )
            .into_response();
    }

    let repo = CustomerQueryRepository::new((*state.db).clone());

    match repo
        .create(
            payload.name.trim(),
            payload.email.trim(),
            payload.message.trim(),
        )
        .await
    {
        Ok(query) => {
            info!(query_id = %query.id, "Customer query registered");
            (StatusCode::CREATED, Json(json!({ "success": true }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to record customer query");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}
