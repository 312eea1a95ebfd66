//! Public listing discovery routes.
//!
//! These routes work without a session; a valid bearer token enriches the
//! detail view with the caller's wishlist flag.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::optional_user;
use crate::routes::manage_listings::ListingResponse;
use parkflex_db::{BookingRepository, ListingRepository, ReviewRepository, WishlistRepository};

/// Creates the public listing router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/parking-listings/", get(list_all))
        .route("/parking-listings/{id}", get(get_detail))
}

/// Listing with owner display name, for the explore view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExploreListingResponse {
    #[serde(flatten)]
    listing: ListingResponse,
    owner: OwnerInfo,
}

/// Owner display name; no email, no credentials.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OwnerInfo {
    first_name: String,
    last_name: String,
}

/// Listing detail with aggregates for the booking page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingDetailResponse {
    #[serde(flatten)]
    listing: ListingResponse,
    review_count: u64,
    average_rating: Decimal,
    booked_dates: Vec<BookedRange>,
    is_wishlisted: bool,
}

/// An occupied closed date interval.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookedRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
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

/// GET /parking-listings/ - Every listing with its owner's name.
async fn list_all(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ListingRepository::new((*state.db).clone());

    match repo.list_all_with_owner().await {
        Ok(rows) => Json(
            rows.into_iter()
                .map(|row| ExploreListingResponse {
                    listing: row.listing.into(),
                    owner: OwnerInfo {
                        first_name: row.owner_first_name,
                        last_name: row.owner_last_name,
                    },
                })
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list listings");
            internal_error()
        }
    }
}

/// GET /parking-listings/:id - Listing detail with review aggregates,
/// occupied dates, and the caller's wishlist flag when signed in.
async fn get_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let listings = ListingRepository::new((*state.db).clone());

    let listing = match listings.find_by_id(id).await {
        Ok(Some(l)) => l,
        Ok(None) => {
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
            error!(error = %e, "Database error loading listing");
            return internal_error();
        }
    };

    let stats = match ReviewRepository::new((*state.db).clone())
        .stats_for_listing(id)
        .await
    {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to load review stats");
            return internal_error();
        }
    };

    let booked = match BookingRepository::new((*state.db).clone())
        .booked_ranges(id)
        .await
    {
        Ok(ranges) => ranges,
        Err(e) => {
            error!(error = %e, "Failed to load booked ranges");
            return internal_error();
        }
    };

    let is_wishlisted = match optional_user(&state, &headers) {
        Some(claims) => WishlistRepository::new((*state.db).clone())
            .exists(claims.user_id(), id)
            .await
            .unwrap_or(false),
        None => false,
    };

    Json(ListingDetailResponse {
        listing: listing.into(),
        review_count: stats.count,
        average_rating: stats.average_rating,
        booked_dates: booked
            .into_iter()
            .map(|r| BookedRange {
                start_date: r.start,
                end_date: r.end,
            })
            .collect(),
        is_wishlisted,
    })
    .into_response()
}
