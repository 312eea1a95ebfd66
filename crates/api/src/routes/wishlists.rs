//! Wishlist routes. All require a session.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use crate::routes::manage_listings::ListingResponse;
use parkflex_db::WishlistRepository;

/// Creates the wishlist router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/manage-wishlists/add", post(add_to_wishlist))
        .route("/manage-wishlists/get-all", get(get_wishlist))
        .route("/manage-wishlists/delete", post(remove_from_wishlist))
}

/// Wishlist mutation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WishlistRequest {
    listing_id: Uuid,
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

/// POST /manage-wishlists/add - Save a listing.
async fn add_to_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<WishlistRequest>,
) -> impl IntoResponse {
    let repo = WishlistRepository::new((*state.db).clone());

    match repo.exists(user.user_id(), payload.listing_id).await {
        Ok(true) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "already_wishlisted",
                    "message": "This listing is already in your wishlist"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking wishlist");
            return internal_error();
        }
    }

    match repo.add(user.user_id(), payload.listing_id).await {
        Ok(_) => (StatusCode::CREATED, Json(json!({ "success": true }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to add wishlist entry");
            internal_error()
        }
    }
}

/// GET /manage-wishlists/get-all - The caller's saved listings.
async fn get_wishlist(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = WishlistRepository::new((*state.db).clone());

    match repo.list_for_user(user.user_id()).await {
        Ok(rows) => Json(
            rows.into_iter()
                .map(ListingResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list wishlist");
            internal_error()
        }
    }
}

/// POST /manage-wishlists/delete - Remove a saved listing.
async fn remove_from_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<WishlistRequest>,
) -> impl IntoResponse {
    let repo = WishlistRepository::new((*state.db).clone());

    match repo.remove(user.user_id(), payload.listing_id).await {
        Ok(true) => Json(json!({ "success": true })).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_wishlisted",
                "message": "This listing is not in your wishlist"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to remove wishlist entry");
            internal_error()
        }
    }
}
