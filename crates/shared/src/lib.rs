//! Shared types, errors, and configuration for ParkFlex.
//!
//! This crate provides common pieces used across all other crates:
//! - Money helpers with decimal precision
//! - Configuration management
//! - JWT token issuance and validation
//! - Auth request/response payloads
//! - Email and payment-gateway clients

pub mod auth;
pub mod config;
pub mod email;
pub mod jwt;
pub mod payment;
pub mod types;

pub use config::AppConfig;
pub use email::{EmailError, EmailService};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use payment::{PaymentError, PaymentGateway};
