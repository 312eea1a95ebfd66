//! Authentication routes: register, login, password reset, profile.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use parkflex_core::auth::{ResetToken, hash_password, hash_reset_token, verify_password};
use parkflex_db::repositories::UpdateProfileInput;
use parkflex_db::UserRepository;
use parkflex_shared::auth::{
    ForgetPasswordRequest, LoginRequest, LoginResponse, Profile, RegisterRequest,
    RegisterResponse, ResetPasswordRequest, UpdateProfileRequest, UserIdentity,
};

/// Creates the public auth router.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/forget-password", post(forget_password))
        .route("/auth/reset-password", post(reset_password))
        .route("/auth/logout", post(logout))
}

/// Creates the auth router for routes that require a session.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/profile", get(get_profile))
        .route("/auth/profile", put(update_profile))
        .route("/auth/getuser/{id}", get(get_user))
}

/// POST /auth/register - Create an account and its wallet.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": "firstName, lastName, email and password are required"
            })),
        )
            .into_response();
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "email_taken",
                    "message": "An account with this email already exists"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error during registration");
            return internal_error("An error occurred during registration");
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Password hashing failed");
            return internal_error("An error occurred during registration");
        }
    };

    let user = match user_repo
        .create_with_wallet(
            payload.first_name.trim(),
            payload.last_name.trim(),
            payload.email.trim(),
            &password_hash,
        )
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return internal_error("An error occurred during registration");
        }
    };

    let token = match state.jwt_service.generate_token(user.id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate token");
            return internal_error("An error occurred during registration");
        }
    };

    info!(user_id = %user.id, "User registered");
    (
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: user.id,
            token,
        }),
    )
        .into_response()
}

/// POST /auth/login - Authenticate and return a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("An error occurred during login");
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("An error occurred during login");
        }
    }

    let token = match state.jwt_service.generate_token(user.id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate token");
            return internal_error("An error occurred during login");
        }
    };

    info!(user_id = %user.id, "User logged in");
    Json(LoginResponse {
        token,
        user: UserIdentity { id: user.id },
    })
    .into_response()
}

/// POST /auth/forget-password - Email a reset link.
///
/// Always answers 200 with the same message so the endpoint cannot be used
/// to probe which emails are registered.
async fn forget_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgetPasswordRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let acknowledged = Json(json!({
        "message": "If that email address is registered, a reset link has been sent."
    }))
    .into_response();

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => return acknowledged,
        Err(e) => {
            error!(error = %e, "Database error during forget-password");
            return internal_error("An error occurred");
        }
    };

    let reset = ResetToken::generate();
    if let Err(e) = user_repo
        .set_reset_token(user.id, &reset.token_hash, reset.expires_at)
        .await
    {
        error!(error = %e, "Failed to store reset token");
        return internal_error("An error occurred");
    }

    if let Err(e) = state
        .email_service
        .send_password_reset_email(&user.email, &reset.token)
        .await
    {
        error!(error = %e, user_id = %user.id, "Failed to send reset email");
        return internal_error("Failed to send the reset email");
    }

    info!(user_id = %user.id, "Password reset email sent");
    acknowledged
}

/// POST /auth/reset-password - Set a new password from an emailed token.
async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> impl IntoResponse {
    if payload.new_password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": "newPassword is required"
            })),
        )
            .into_response();
    }

    let user_repo = UserRepository::new((*state.db).clone());
    let token_hash = hash_reset_token(&payload.token);

    let user = match user_repo.find_by_valid_reset_token(&token_hash).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Password reset token is invalid or has expired."
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during password reset");
            return internal_error("An error occurred");
        }
    };

    let password_hash = match hash_password(&payload.new_password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Password hashing failed");
            return internal_error("An error occurred");
        }
    };

    let user = match user_repo
        .update_password_and_clear_token(user, &password_hash)
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to update password");
            return internal_error("An error occurred");
        }
    };

    // Confirmation mail is best-effort; the reset already succeeded.
    if let Err(e) = state
        .email_service
        .send_password_reset_confirmation(&user.email)
        .await
    {
        warn!(error = %e, user_id = %user.id, "Failed to send reset confirmation");
    }

    info!(user_id = %user.id, "Password reset completed");
    Json(json!({ "message": "Your password has been changed successfully." })).into_response()
}

/// POST /auth/logout - Stateless acknowledgement; clients drop the token.
async fn logout() -> impl IntoResponse {
    Json(json!({ "message": "Logged out successfully." }))
}

/// GET /auth/profile - The authenticated user's profile.
async fn get_profile(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    profile_response(&state, user.user_id()).await
}

/// GET /auth/getuser/:id - Public identity of any user, for display names.
async fn get_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    profile_response(&state, id).await
}

/// PUT /auth/profile - Partial profile update.
async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let current = match user_repo.find_by_id(user.user_id()).await {
        Ok(Some(u)) => u,
        Ok(None) => return user_not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            return internal_error("An error occurred");
        }
    };

    let password_hash = match payload.password {
        Some(ref password) if !password.is_empty() => match hash_password(password) {
            Ok(h) => Some(h),
            Err(e) => {
                error!(error = %e, "Password hashing failed");
                return internal_error("An error occurred");
            }
        },
        _ => None,
    };

    let updated = match user_repo
        .update_profile(
            current,
            UpdateProfileInput {
                first_name: payload.first_name,
                last_name: payload.last_name,
                email: payload.email,
                password_hash,
            },
        )
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to update profile");
            return internal_error("An error occurred");
        }
    };

    Json(Profile {
        id: updated.id,
        first_name: updated.first_name,
        last_name: updated.last_name,
        email: updated.email,
    })
    .into_response()
}

async fn profile_response(state: &AppState, user_id: Uuid) -> axum::response::Response {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_id(user_id).await {
        Ok(Some(u)) => Json(Profile {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
        })
        .into_response(),
        Ok(None) => user_not_found(),
        Err(e) => {
            error!(error = %e, "Database error loading user");
            internal_error("An error occurred")
        }
    }
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
        })),
    )
        .into_response()
}

fn user_not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "user_not_found",
            "message": "User not found"
        })),
    )
        .into_response()
}

fn internal_error(message: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": message
        })),
    )
        .into_response()
}
