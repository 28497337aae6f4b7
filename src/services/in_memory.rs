use super::recorder::TransactionRecorder;
use crate::error::StoreError;
use crate::models::{NewTransaction, TransactionRecord};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local transaction recorder.
///
/// Backs the service when no hosted store is configured and stands in for
/// the hosted store in tests. History is lost on restart.
#[derive(Default, Clone)]
pub struct InMemoryRecorder {
    records: Arc<RwLock<Vec<TransactionRecord>>>,
    next_id: Arc<AtomicI64>,
    failing: Arc<AtomicBool>,
}

impl InMemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following operation fail with `StoreError::Unavailable`
    /// until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Inserts a fully formed record, keeping its timestamp.
    pub async fn seed(&self, record: TransactionRecord) {
        self.next_id.fetch_max(record.id, Ordering::SeqCst);
        self.records.write().await.push(record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("in-memory store set to fail".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TransactionRecorder for InMemoryRecorder {
    async fn insert(&self, record: NewTransaction) -> Result<(), StoreError> {
        self.check_available()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = TransactionRecord {
            id,
            amount: record.amount,
            service: record.service,
            status: record.status,
            crypto_tx: record.crypto_tx,
            created_at: Utc::now(),
        };

        self.records.write().await.push(stored);
        tracing::debug!(id, "Transaction stored in memory");
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        self.check_available()?;

        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn ping(&self) -> bool {
        self.check_available().is_ok()
    }
}
