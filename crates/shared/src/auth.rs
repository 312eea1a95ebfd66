//! Request and response payloads for the auth routes.
//!
//! Field names mirror the public JSON contract (camelCase).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration request payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// User first name.
    pub first_name: String,
    /// User last name.
    pub last_name: String,
    /// User email.
    pub email: String,
    /// User password (plaintext over TLS, hashed before storage).
    pub password: String,
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
}

/// Registration response payload.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    /// New user's ID.
    pub user: Uuid,
    /// Bearer token for the new session.
    pub token: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Bearer token for the session.
    pub token: String,
    /// Authenticated user identity.
    pub user: UserIdentity,
}

/// Minimal user identity returned on login.
#[derive(Debug, Clone, Serialize)]
pub struct UserIdentity {
    /// The user's ID (field name kept from the public contract).
    #[serde(rename = "_id")]
    pub id: Uuid,
}

/// Forget-password request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ForgetPasswordRequest {
    /// Email to send the reset link to.
    pub email: String,
}

/// Reset-password request payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// The reset token from the emailed link.
    pub token: String,
    /// The new password.
    pub new_password: String,
}

/// Profile update request payload. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New password.
    pub password: Option<String>,
}

/// Public profile returned to the authenticated user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// User ID.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email.
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_camel_case() {
        let body = r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","password":"secret"}"#;
        let req: RegisterRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.first_name, "Ada");
        assert_eq!(req.last_name, "Lovelace");
    }

    #[test]
    fn test_login_response_shape() {
        let id = Uuid::new_v4();
        let resp = LoginResponse {
            token: "t".into(),
            user: UserIdentity { id },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["user"]["_id"], serde_json::json!(id));
    }

    #[test]
    fn test_update_profile_partial() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"firstName":"Grace"}"#).unwrap();
        assert_eq!(req.first_name.as_deref(), Some("Grace"));
        assert!(req.email.is_none());
    }
}
