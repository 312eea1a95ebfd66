//! Wallet routes: balance, deposits through the payment provider,
//! withdrawals.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::middleware::auth::AuthUser;
use parkflex_core::wallet::WalletError;
use parkflex_db::WalletRepository;

/// Creates the wallet router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallet/get-balance", get(get_balance))
        .route("/wallet/add-money", post(add_money))
        .route("/wallet/withdraw-money", post(withdraw_money))
}

/// Deposit/withdrawal request body.
#[derive(Debug, Deserialize)]
struct AmountRequest {
    amount: Decimal,
}

fn wallet_error_response(err: &WalletError) -> axum::response::Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "Wallet operation failed");
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

/// GET /wallet/get-balance - The authenticated user's balance.
async fn get_balance(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = WalletRepository::new((*state.db).clone());

    match repo.find_by_user(user.user_id()).await {
        Ok(Some(wallet)) => Json(json!({ "balance": wallet.balance })).into_response(),
        Ok(None) => {
            wallet_error_response(&WalletError::WalletNotFound(user.user_id()))
        }
        Err(e) => {
            error!(error = %e, "Database error reading balance");
            wallet_error_response(&WalletError::Database(e.to_string()))
        }
    }
}

/// POST /wallet/add-money - Charge the card via the payment provider, then
/// credit the wallet and log a `top-up`.
async fn add_money(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AmountRequest>,
) -> impl IntoResponse {
    let intent = match state.payment_gateway.create_payment_intent(payload.amount).await {
        Ok(i) => i,
        Err(e) => {
            error!(error = %e, "Payment provider rejected the deposit");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "payment_failed",
                    "message": "The payment could not be processed"
                })),
            )
                .into_response();
        }
    };

    let repo = WalletRepository::new((*state.db).clone());
    match repo.top_up(user.user_id(), payload.amount).await {
        Ok(wallet) => {
            info!(
                user_id = %user.user_id(),
                amount = %payload.amount,
                payment_intent = %intent.id,
                "Wallet credited"
            );
            Json(json!({
                "success": true,
                "newBalance": wallet.balance
            }))
            .into_response()
        }
        Err(e) => wallet_error_response(&e),
    }
}

/// POST /wallet/withdraw-money - Debit the wallet and log a `withdrawal`.
async fn withdraw_money(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AmountRequest>,
) -> impl IntoResponse {
    let repo = WalletRepository::new((*state.db).clone());

    match repo.withdraw(user.user_id(), payload.amount).await {
        Ok(wallet) => {
            info!(
                user_id = %user.user_id(),
                amount = %payload.amount,
                "Wallet debited"
            );
            Json(json!({
                "success": true,
                "newBalance": wallet.balance
            }))
            .into_response()
        }
        Err(e) => wallet_error_response(&e),
    }
}
