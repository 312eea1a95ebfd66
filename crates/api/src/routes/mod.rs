//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod auth;
pub mod customer_query;
pub mod health;
pub mod manage_bookings;
pub mod manage_listings;
pub mod notifications;
pub mod parking_listings;
pub mod reviews;
pub mod transactions;
pub mod wallet;
pub mod wishlists;

/// Creates the API router, combining public and protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Routes that require a valid bearer token
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(manage_listings::routes())
        .merge(wallet::routes())
        .merge(transactions::routes())
        .merge(notifications::routes())
        .merge(wishlists::routes())
        .merge(reviews::protected_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::public_routes())
        .merge(manage_bookings::routes())
        .merge(parking_listings::routes())
        .merge(reviews::public_routes())
        .merge(customer_query::routes())
        .merge(protected_routes)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::AUTHORIZATION},
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::{AppState, create_router};
    use parkflex_shared::{
        EmailService, JwtConfig, JwtService, PaymentGateway,
        config::{EmailConfig, PaymentConfig},
    };

    fn test_state() -> AppState {
        let email_config = EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@parkflex.test".to_string(),
            from_name: "ParkFlex".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
        };
        let payment_config = PaymentConfig {
            secret_key: "sk_test_unused".to_string(),
            currency: "usd".to_string(),
            api_url: "http://localhost:9".to_string(),
        };
        AppState {
            db: Arc::new(sea_orm::DatabaseConnection::default()),
            jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
            email_service: Arc::new(EmailService::new(email_config)),
            payment_gateway: Arc::new(PaymentGateway::new(payment_config)),
        }
    }

    #[tokio::test]
    async fn test_health_endpoint_responds() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_protected_route_without_token_is_unauthorized() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/wallet/get-balance")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "missing_token");
    }

    #[tokio::test]
    async fn test_protected_route_with_garbage_token_is_unauthorized() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/notifications/")
                    .header(AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "invalid_token");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/no-such-route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
