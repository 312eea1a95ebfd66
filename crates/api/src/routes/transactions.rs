//! Transaction-log routes.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use parkflex_core::wallet::TransactionKind;
use parkflex_db::TransactionRepository;
use parkflex_db::entities::transactions;

/// Creates the transaction router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/transaction/get-transactions", get(get_transactions))
}

/// Transaction-log entry response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionResponse {
    #[serde(rename = "_id")]
    id: Uuid,
    amount: Decimal,
    /// Wire value: `top-up`, `withdrawal`, `earning`, or `payment`.
    #[serde(rename = "type")]
    kind: String,
    /// ISO 8601 timestamp.
    date: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(t: transactions::Model) -> Self {
        Self {
            id: t.id,
            amount: t.amount,
            kind: TransactionKind::from(t.kind).as_str().to_string(),
            date: t.created_at.to_rfc3339(),
        }
    }
}

/// GET /transaction/get-transactions - The authenticated user's wallet
/// history, newest first.
async fn get_transactions(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list_for_user(user.user_id()).await {
        Ok(rows) => Json(
            rows.into_iter()
                .map(TransactionResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => {
            error!(error = %e, "Database error listing transactions");
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_response_uses_type_and_date_fields() {
        let response = TransactionResponse {
            id: Uuid::new_v4(),
            amount: dec!(75),
            kind: TransactionKind::Payment.as_str().to_string(),
            date: "2026-09-01T12:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("_id").is_some());
        assert_eq!(json["type"], "payment");
        assert!(json.get("date").is_some());
        assert!(json.get("transactionType").is_none());
        assert!(json.get("createdAt").is_none());
    }
}
