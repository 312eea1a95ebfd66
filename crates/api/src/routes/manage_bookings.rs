//! Booking routes: creation with wallet settlement, listing, edit, delete.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use parkflex_core::booking::BookingError;
use parkflex_db::BookingRepository;
use parkflex_db::entities::bookings;
use parkflex_db::repositories::{BookingWithListing, CreateBookingInput, UpdateBookingInput};

/// Creates the booking router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/manage-bookings/add-booking", post(add_booking))
        .route("/manage-bookings/bookings", get(list_bookings))
        .route(
            "/manage-bookings/bookings/user/{user_id}",
            get(list_user_bookings),
        )
        .route("/manage-bookings/bookings/{id}", put(edit_booking))
        .route("/manage-bookings/bookings/{id}", delete(delete_booking))
}

/// Create-booking request body (public contract, camelCase).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddBookingRequest {
    listing_id: Uuid,
    seeker_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    vehicle_type: String,
    special_requests: Option<String>,
    booking_price: Decimal,
}

/// Edit-booking request body. All fields optional.
///
/// `specialRequests` distinguishes absent (leave unchanged) from an explicit
/// `null` (clear the stored value), so it needs the double-option codec.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditBookingRequest {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    vehicle_type: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    special_requests: Option<Option<String>>,
}

/// Booking response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingResponse {
    #[serde(rename = "_id")]
    id: Uuid,
    listing_id: Uuid,
    seeker_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    vehicle_type: String,
    special_requests: Option<String>,
    booking_price: Decimal,
    created_at: String,
}

impl From<bookings::Model> for BookingResponse {
    fn from(b: bookings::Model) -> Self {
        Self {
            id: b.id,
            listing_id: b.listing_id,
            seeker_id: b.seeker_id,
            start_date: b.start_date,
            end_date: b.end_date,
            vehicle_type: b.vehicle_type,
            special_requests: b.special_requests,
            booking_price: b.price,
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

/// Booking joined with listing details, for list views.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListedBookingResponse {
    #[serde(flatten)]
    booking: BookingResponse,
    listing_name: String,
    listing_city: String,
}

impl From<BookingWithListing> for ListedBookingResponse {
    fn from(row: BookingWithListing) -> Self {
        Self {
            booking: row.booking.into(),
            listing_name: row.listing.name,
            listing_city: row.listing.city,
        }
    }
}

fn booking_error_response(err: &BookingError) -> axum::response::Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "Booking operation failed");
    }
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

fn db_error_response(err: &sea_orm::DbErr) -> axum::response::Response {
    error!(error = %err, "Database error in booking route");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

/// POST /manage-bookings/add-booking - Reserve a listing and settle wallets.
async fn add_booking(
    State(state): State<AppState>,
    Json(payload): Json<AddBookingRequest>,
) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());

    match repo
        .create_booking(CreateBookingInput {
            listing_id: payload.listing_id,
            seeker_id: payload.seeker_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            vehicle_type: payload.vehicle_type,
            special_requests: payload.special_requests,
            price: payload.booking_price,
        })
        .await
    {
        Ok(booking) => (
            StatusCode::CREATED,
            Json(BookingResponse::from(booking)),
        )
            .into_response(),
        Err(e) => booking_error_response(&e),
    }
}

/// GET /manage-bookings/bookings - Every booking with its listing.
async fn list_bookings(State(state): State<AppState>) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());

    match repo.list_all().await {
        Ok(rows) => Json(
            rows.into_iter()
                .map(ListedBookingResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => db_error_response(&e),
    }
}

/// GET /manage-bookings/bookings/user/:userId - One seeker's bookings.
async fn list_user_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());

    match repo.list_for_seeker(user_id).await {
        Ok(rows) => Json(
            rows.into_iter()
                .map(ListedBookingResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => db_error_response(&e),
    }
}

/// PUT /manage-bookings/bookings/:id - Edit dates or details.
async fn edit_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditBookingRequest>,
) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());

    match repo
        .update_booking(
            id,
            UpdateBookingInput {
                start_date: payload.start_date,
                end_date: payload.end_date,
                vehicle_type: payload.vehicle_type,
                special_requests: payload.special_requests,
            },
        )
        .await
    {
        Ok(booking) => Json(BookingResponse::from(booking)).into_response(),
        Err(e) => booking_error_response(&e),
    }
}

/// DELETE /manage-bookings/bookings/:id - Cancel; dates free, no refund.
async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => booking_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_add_booking_request_parses_public_contract() {
        let body = r#"{
            "listingId": "7f9c21a2-5f58-4a70-9df1-2f1f7a3c9b10",
            "seekerId": "3a4f1a77-36f7-41e8-8a30-d6e2cf0b14c2",
            "startDate": "2026-09-01",
            "endDate": "2026-09-03",
            "vehicleType": "sedan",
            "specialRequests": "near the elevator",
            "bookingPrice": "75.00"
        }"#;

        let req: AddBookingRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.vehicle_type, "sedan");
        assert_eq!(req.booking_price, dec!(75));
        assert_eq!(req.start_date.to_string(), "2026-09-01");
    }

    #[test]
    fn test_booking_response_uses_camel_case_and_underscore_id() {
        let now = Utc::now();
        let response = BookingResponse {
            id: Uuid::new_v4(),
            listing_id: Uuid::new_v4(),
            seeker_id: Uuid::new_v4(),
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 3).unwrap(),
            vehicle_type: "suv".to_string(),
            special_requests: None,
            booking_price: dec!(75),
            created_at: now.to_rfc3339(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("listingId").is_some());
        assert!(json.get("bookingPrice").is_some());
        assert!(json.get("listing_id").is_none());
    }

    #[test]
    fn test_edit_booking_request_distinguishes_absent_from_null() {
        // Absent field: leave unchanged. Explicit null: clear the value.
        let absent: EditBookingRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(absent.special_requests.is_none());

        let cleared: EditBookingRequest =
            serde_json::from_str(r#"{"specialRequests": null}"#).unwrap();
        assert_eq!(cleared.special_requests, Some(None));

        let replaced: EditBookingRequest =
            serde_json::from_str(r#"{"specialRequests": "gate code 4711"}"#).unwrap();
        assert_eq!(
            replaced.special_requests,
            Some(Some("gate code 4711".to_string()))
        );
    }
}
