//! Email service for sending transactional emails.
//!
//! Uses `lettre` for SMTP transport. Only password-reset mail is sent today.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::config::EmailConfig;

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
            .map_err(|e| EmailError::SendError(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(creds)
            .build();

        Ok(transport)
    }

    /// Sends a password reset email with the tokenized link.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_password_reset_email(
        &self,
        to_email: &str,
        token: &str,
    ) -> Result<(), EmailError> {
        let reset_url = format!("{}/#/resetpassword/{}", self.config.frontend_url, token);

        let subject = "Password Reset Request";
        let body = format!(
            "You are receiving this email because you (or someone else) has requested the reset of the password for your account.\n\n\
             Please click on the following link, or paste this into your browser to complete the process within one hour of receiving it:\n\n\
             {reset_url}\n\n\
             If you did not request this, please ignore this email and your password will remain unchanged.\n"
        );

        self.send_email(to_email, subject, &body).await
    }

    /// Sends a confirmation email after a successful password reset.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_password_reset_confirmation(
        &self,
        to_email: &str,
    ) -> Result<(), EmailError> {
        self.send_email(
            to_email,
            "Password Reset Confirmation",
            "Your password has been changed successfully.",
        )
        .await
    }

    /// Sends a generic plain-text email.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::BuildError(e.to_string()))?;

        let transport = self.create_transport()?;
        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: 587,
            smtp_username: "user".into(),
            smtp_password: "pass".into(),
            from_email: "noreply@parkflex.example".into(),
            from_name: "ParkFlex".into(),
            frontend_url: "https://parkflex.example".into(),
        }
    }

    #[test]
    fn test_create_transport() {
        let service = EmailService::new(test_config());
        assert!(service.create_transport().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_recipient_address() {
        let service = EmailService::new(test_config());
        let result = service.send_email("not-an-address", "subject", "body").await;
        assert!(matches!(result, Err(EmailError::InvalidAddress(_))));
    }
}
