//! Database enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use parkflex_core::wallet::TransactionKind as CoreTransactionKind;

/// Transaction-log entry kind (`transaction_kind` Postgres enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    /// Direct deposit.
    #[sea_orm(string_value = "top-up")]
    TopUp,
    /// Direct withdrawal.
    #[sea_orm(string_value = "withdrawal")]
    Withdrawal,
    /// Booking settlement credit (owner side).
    #[sea_orm(string_value = "earning")]
    Earning,
    /// Booking settlement debit (seeker side).
    #[sea_orm(string_value = "payment")]
    Payment,
}

impl From<CoreTransactionKind> for TransactionKind {
    fn from(kind: CoreTransactionKind) -> Self {
        match kind {
            CoreTransactionKind::TopUp => Self::TopUp,
            CoreTransactionKind::Withdrawal => Self::Withdrawal,
            CoreTransactionKind::Earning => Self::Earning,
            CoreTransactionKind::Payment => Self::Payment,
        }
    }
}

impl From<TransactionKind> for CoreTransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::TopUp => Self::TopUp,
            TransactionKind::Withdrawal => Self::Withdrawal,
            TransactionKind::Earning => Self::Earning,
            TransactionKind::Payment => Self::Payment,
        }
    }
}

/// Listing parking type (`parking_type` Postgres enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "parking_type")]
#[serde(rename_all = "lowercase")]
pub enum ParkingType {
    /// Covered/indoor spot.
    #[sea_orm(string_value = "indoor")]
    Indoor,
    /// Open-air spot.
    #[sea_orm(string_value = "outdoor")]
    Outdoor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_kind_wire_values() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::TopUp).unwrap(),
            "\"top-up\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::Earning).unwrap(),
            "\"earning\""
        );
    }

    #[test]
    fn test_core_kind_round_trip() {
        for kind in [
            CoreTransactionKind::TopUp,
            CoreTransactionKind::Withdrawal,
            CoreTransactionKind::Earning,
            CoreTransactionKind::Payment,
        ] {
            let db_kind: TransactionKind = kind.into();
            let back: CoreTransactionKind = db_kind.into();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_parking_type_wire_values() {
        assert_eq!(
            serde_json::to_string(&ParkingType::Indoor).unwrap(),
            "\"indoor\""
        );
        assert_eq!(
            serde_json::to_string(&ParkingType::Outdoor).unwrap(),
            "\"outdoor\""
        );
    }
}
