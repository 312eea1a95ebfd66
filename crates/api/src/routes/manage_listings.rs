//! Owner-side listing management routes. All require a session.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use parkflex_db::ListingRepository;
use parkflex_db::entities::{listings, sea_orm_active_enums::ParkingType};
use parkflex_db::repositories::{CreateListingInput, UpdateListingInput};

/// Default coordinates when a listing is created without any (Halifax).
const DEFAULT_LATITUDE: Decimal = dec!(44.635631);
const DEFAULT_LONGITUDE: Decimal = dec!(-63.595174);

/// Creates the listing-management router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/manage-listings/create", post(create_listing))
        .route("/manage-listings/edit", put(edit_listing))
        .route("/manage-listings/get-all", post(get_all_listings))
        .route("/manage-listings/get", post(get_listing))
        .route("/manage-listings/delete", post(delete_listing))
}

/// Create-listing request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateListingRequest {
    name: String,
    street_address: String,
    country: String,
    city: String,
    postal_code: String,
    description: String,
    daily_rate: Decimal,
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
    parking_type: ParkingType,
    image_data: String,
    image_content_type: String,
}

/// Edit-listing request body. Everything except the ID is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditListingRequest {
    listing_id: Uuid,
    name: Option<String>,
    street_address: Option<String>,
    country: Option<String>,
    city: Option<String>,
    postal_code: Option<String>,
    description: Option<String>,
    daily_rate: Option<Decimal>,
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
    parking_type: Option<ParkingType>,
    image_data: Option<String>,
    image_content_type: Option<String>,
}

/// Single-listing request body (get/delete).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingIdRequest {
    listing_id: Uuid,
}

/// Listing response body for the owner views.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub street_address: String,
    pub country: String,
    pub city: String,
    pub postal_code: String,
    pub description: String,
    pub daily_rate: Decimal,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub parking_type: ParkingType,
    pub image_data: String,
    pub image_content_type: String,
}

impl From<listings::Model> for ListingResponse {
    fn from(l: listings::Model) -> Self {
        Self {
            id: l.id,
            owner_id: l.owner_id,
            name: l.name,
            street_address: l.street_address,
            country: l.country,
            city: l.city,
            postal_code: l.postal_code,
            description: l.description,
            daily_rate: l.daily_rate,
            latitude: l.latitude,
            longitude: l.longitude,
            parking_type: l.parking_type,
            image_data: l.image_data,
            image_content_type: l.image_content_type,
        }
    }
}

fn listing_not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "listing_not_found",
            "message": "Listing not found"
        })),
    )
        .into_response()
}

fn not_owner() -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": "You do not own this listing"
        })),
    )
        .into_response()
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

/// POST /manage-listings/create - Publish a new parking spot.
async fn create_listing(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateListingRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() || payload.daily_rate <= Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": "name is required and dailyRate must be positive"
            })),
        )
            .into_response();
    }

    let repo = ListingRepository::new((*state.db).clone());

    match repo
        .create(CreateListingInput {
            owner_id: user.user_id(),
            name: payload.name,
            street_address: payload.street_address,
            country: payload.country,
            city: payload.city,
            postal_code: payload.postal_code,
            description: payload.description,
            daily_rate: payload.daily_rate,
            latitude: payload.latitude.unwrap_or(DEFAULT_LATITUDE).round_dp(6),
            longitude: payload.longitude.unwrap_or(DEFAULT_LONGITUDE).round_dp(6),
            parking_type: payload.parking_type,
            image_data: payload.image_data,
            image_content_type: payload.image_content_type,
        })
        .await
    {
        Ok(listing) => {
            info!(listing_id = %listing.id, owner_id = %listing.owner_id, "Listing created");
            (StatusCode::CREATED, Json(ListingResponse::from(listing))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create listing");
            internal_error()
        }
    }
}

/// PUT /manage-listings/edit - Update an owned listing.
async fn edit_listing(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<EditListingRequest>,
) -> impl IntoResponse {
    let repo = ListingRepository::new((*state.db).clone());

    let listing = match repo.find_by_id(payload.listing_id).await {
        Ok(Some(l)) => l,
        Ok(None) => return listing_not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading listing");
            return internal_error();
        }
    };
    if listing.owner_id != user.user_id() {
        return not_owner();
    }

    let image = match (payload.image_data, payload.image_content_type) {
        (Some(data), Some(content_type)) => Some((data, content_type)),
        _ => None,
    };

    match repo
        .update(
            listing,
            UpdateListingInput {
                name: payload.name,
                street_address: payload.street_address,
                country: payload.country,
                city: payload.city,
                postal_code: payload.postal_code,
                description: payload.description,
                daily_rate: payload.daily_rate,
                latitude: payload.latitude.map(|v| v.round_dp(6)),
                longitude: payload.longitude.map(|v| v.round_dp(6)),
                parking_type: payload.parking_type,
                image,
            },
        )
        .await
    {
        Ok(updated) => Json(ListingResponse::from(updated)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update listing");
            internal_error()
        }
    }
}

/// POST /manage-listings/get-all - The owner's listings.
async fn get_all_listings(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = ListingRepository::new((*state.db).clone());

    match repo.list_by_owner(user.user_id()).await {
        Ok(rows) => Json(
            rows.into_iter()
                .map(ListingResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list listings");
            internal_error()
        }
    }
}

/// POST /manage-listings/get - One listing by ID.
async fn get_listing(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<ListingIdRequest>,
) -> impl IntoResponse {
    let repo = ListingRepository::new((*state.db).clone());

    match repo.find_by_id(payload.listing_id).await {
        Ok(Some(listing)) => Json(ListingResponse::from(listing)).into_response(),
        Ok(None) => listing_not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading listing");
            internal_error()
        }
    }
}

/// POST /manage-listings/delete - Remove an owned listing.
async fn delete_listing(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ListingIdRequest>,
) -> impl IntoResponse {
    let repo = ListingRepository::new((*state.db).clone());

    let listing = match repo.find_by_id(payload.listing_id).await {
        Ok(Some(l)) => l,
        Ok(None) => return listing_not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading listing");
            return internal_error();
        }
    };
    if listing.owner_id != user.user_id() {
        return not_owner();
    }

    match repo.delete(listing).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete listing");
            internal_error()
        }
    }
}
