//! Payment gateway client for wallet top-ups.
//!
//! Creates a payment intent against the Stripe REST API before the wallet is
//! credited. The capture flow beyond intent creation is out of scope; a
//! failed intent surfaces as an external-service error and the wallet is
//! left untouched.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use thiserror::Error;

use crate::config::PaymentConfig;

/// Payment gateway errors.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The amount cannot be expressed in minor units.
    #[error("Invalid payment amount: {0}")]
    InvalidAmount(Decimal),
    /// The provider rejected the request or was unreachable.
    #[error("Payment provider error: {0}")]
    Provider(String),
}

/// A created payment intent.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Provider-assigned intent ID.
    pub id: String,
    /// Intent status as reported by the provider.
    pub status: String,
}

/// Payment gateway client.
#[derive(Debug, Clone)]
pub struct PaymentGateway {
    config: PaymentConfig,
    client: reqwest::Client,
}

impl PaymentGateway {
    /// Creates a new payment gateway client.
    #[must_use]
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Converts a decimal major-unit amount to integer minor units (cents).
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InvalidAmount` if the amount has sub-cent
    /// precision or does not fit in an `i64`.
    pub fn to_minor_units(amount: Decimal) -> Result<i64, PaymentError> {
        let minor = amount * Decimal::ONE_HUNDRED;
        if minor != minor.trunc() {
            return Err(PaymentError::InvalidAmount(amount));
        }
        minor.to_i64().ok_or(PaymentError::InvalidAmount(amount))
    }

    /// Creates a card payment intent for the given major-unit amount.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the amount is invalid or the provider call
    /// fails.
    pub async fn create_payment_intent(
        &self,
        amount: Decimal,
    ) -> Result<PaymentIntent, PaymentError> {
        let minor_units = Self::to_minor_units(amount)?;

        let response = self
            .client
            .post(format!("{}/payment_intents", self.config.api_url))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .form(&[
                ("amount", minor_units.to_string()),
                ("currency", self.config.currency.clone()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await
            .map_err(|e| PaymentError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Provider(format!("{status}: {body}")));
        }

        response
            .json::<PaymentIntent>()
            .await
            .map_err(|e| PaymentError::Provider(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_minor_units_whole_dollars() {
        assert_eq!(PaymentGateway::to_minor_units(dec!(50)).unwrap(), 5000);
    }

    #[test]
    fn test_to_minor_units_cents() {
        assert_eq!(PaymentGateway::to_minor_units(dec!(12.34)).unwrap(), 1234);
    }

    #[test]
    fn test_to_minor_units_rejects_sub_cent() {
        assert!(matches!(
            PaymentGateway::to_minor_units(dec!(0.001)),
            Err(PaymentError::InvalidAmount(_))
        ));
    }
}
