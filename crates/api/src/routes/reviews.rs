//! Listing review routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use parkflex_core::review::validate_review;
use parkflex_db::ReviewRepository;
use parkflex_db::repositories::ReviewWithAuthor;

/// Creates the public review router.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/listings/{listing_id}/reviews", get(list_reviews))
}

/// Creates the review router for routes that require a session.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/listings/{listing_id}/review", post(add_review))
}

/// Add-review request body.
#[derive(Debug, Deserialize)]
struct AddReviewRequest {
    rating: i32,
    description: String,
}

/// Review response body with the author's display name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewResponse {
    #[serde(rename = "_id")]
    id: Uuid,
    listing_id: Uuid,
    rating: i32,
    description: String,
    author_first_name: String,
    author_last_name: String,
    created_at: String,
}

impl From<ReviewWithAuthor> for ReviewResponse {
    fn from(row: ReviewWithAuthor) -> Self {
        Self {
            id: row.review.id,
            listing_id: row.review.listing_id,
            rating: row.review.rating,
            description: row.review.description,
            author_first_name: row.author_first_name,
            author_last_name: row.author_last_name,
            created_at: row.review.created_at.to_rfc3339(),
        }
    }
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

/// GET /listings/:listingId/reviews - All reviews for a listing.
async fn list_reviews(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ReviewRepository::new((*state.db).clone());

    match repo.list_for_listing(listing_id).await {
        Ok(rows) => Json(
            rows.into_iter()
                .map(ReviewResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list reviews");
            internal_error()
        }
    }
}

/// POST /listings/:listingId/review - Submit a review.
async fn add_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(listing_id): Path<Uuid>,
    Json(payload): Json<AddReviewRequest>,
) -> impl IntoResponse {
    let repo = ReviewRepository::new((*state.db).clone());

    let ctx = match repo.context_for(listing_id, user.user_id()).await {
        Ok(c) => c,
        Err(DbErr::RecordNotFound(_)) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "listing_not_found",
                    "message": "Listing not found"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to load review context");
            return internal_error();
        }
    };

    if let Err(e) = validate_review(payload.rating, &payload.description, &ctx) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": e.to_string()
            })),
        )
            .into_response();
    }

    match repo
        .create(listing_id, user.user_id(), payload.rating, &payload.description)
        .await
    {
        Ok(review) => {
            info!(review_id = %review.id, listing_id = %listing_id, "Review added");
            (
                StatusCode::CREATED,
                Json(json!({
                    "_id": review.id,
                    "listingId": review.listing_id,
                    "rating": review.rating,
                    "description": review.description,
                    "createdAt": review.created_at.to_rfc3339(),
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create review");
            internal_error()
        }
    }
}
