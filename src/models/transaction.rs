use super::session::ServiceType;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement reference written until real settlement is wired up.
pub const PLACEHOLDER_CRYPTO_TX: &str = "simulated_hash_123";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Paid,
    /// Anything else found in the table. Never written by this service.
    #[serde(other)]
    Unknown,
}

/// Row handed to the transaction recorder. Only [`NewTransaction::paid`]
/// builds one, so every insert carries `status = paid`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub service: ServiceType,
    pub status: TransactionStatus,
    pub crypto_tx: String,
}

impl NewTransaction {
    pub fn paid(amount: Decimal, service: ServiceType) -> Self {
        Self {
            amount,
            service,
            status: TransactionStatus::Paid,
            crypto_tx: PLACEHOLDER_CRYPTO_TX.to_string(),
        }
    }
}

/// Row as stored, with the store-assigned id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub service: ServiceType,
    pub status: TransactionStatus,
    pub crypto_tx: String,
    pub created_at: DateTime<Utc>,
}
