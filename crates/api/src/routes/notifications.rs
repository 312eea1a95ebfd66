//! Notification routes.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use parkflex_db::NotificationRepository;
use parkflex_db::entities::notifications;

/// Creates the notification router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/notifications/", get(get_notifications))
}

/// Notification response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationResponse {
    #[serde(rename = "_id")]
    id: Uuid,
    message: String,
    read: bool,
    created_at: String,
}

impl From<notifications::Model> for NotificationResponse {
    fn from(n: notifications::Model) -> Self {
        Self {
            id: n.id,
            message: n.message,
            read: n.read,
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

/// GET /notifications/ - The caller's notifications, newest first.
///
/// Fetching is acknowledging: every returned notification is flagged read in
/// the same database transaction, while the response still shows the flags as
/// they were stored.
async fn get_notifications(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    match repo.fetch_and_mark_read(user.user_id()).await {
        Ok(rows) => {
            let notifications: Vec<NotificationResponse> =
                rows.into_iter().map(NotificationResponse::from).collect();
            Json(json!({ "notifications": notifications })).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch notifications");
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

    #[test]
    fn test_response_body_is_wrapped_in_notifications_key() {
        let rows = vec![NotificationResponse {
            id: Uuid::new_v4(),
            message: "Amount $50 has been credited in your wallet.".to_string(),
            read: false,
            created_at: "2026-09-01T12:00:00+00:00".to_string(),
        }];

        let body = json!({ "notifications": rows });
        assert!(body["notifications"].is_array());
        assert_eq!(body["notifications"][0]["read"], false);
        assert!(body["notifications"][0].get("_id").is_some());
    }
}
