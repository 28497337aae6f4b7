use crate::error::StoreError;
use crate::models::{NewTransaction, TransactionRecord};
use async_trait::async_trait;

/// Durable store for transaction records.
#[async_trait]
pub trait TransactionRecorder: Send + Sync {
    async fn insert(&self, record: NewTransaction) -> Result<(), StoreError>;

    /// All records, newest first.
    async fn list_recent(&self) -> Result<Vec<TransactionRecord>, StoreError>;

    /// Whether the store currently answers.
    async fn ping(&self) -> bool {
        self.list_recent().await.is_ok()
    }
}

/// Stand-in used when the hosted store has no endpoint or key. Every
/// operation fails.
pub struct UnconfiguredRecorder;

#[async_trait]
impl TransactionRecorder for UnconfiguredRecorder {
    async fn insert(&self, _record: NewTransaction) -> Result<(), StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn list_recent(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn ping(&self) -> bool {
        false
    }
}
