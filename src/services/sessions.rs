use crate::models::{CheckoutMode, CheckoutSession};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

pub type SharedSession = Arc<Mutex<CheckoutSession>>;

/// Live checkout sessions, keyed by id.
///
/// Sessions idle for longer than the configured time are dropped, the same
/// way a reloaded page loses its state. Events for one session are
/// serialized by its mutex.
pub struct SessionRegistry {
    sessions: Cache<Uuid, SharedSession>,
    default_mode: CheckoutMode,
}

impl SessionRegistry {
    pub fn new(default_mode: CheckoutMode, idle_timeout: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(10_000)
            .time_to_idle(idle_timeout)
            .build();

        Self {
            sessions,
            default_mode,
        }
    }

    pub fn default_mode(&self) -> CheckoutMode {
        self.default_mode
    }

    pub async fn create(&self, mode: Option<CheckoutMode>) -> SharedSession {
        let session = CheckoutSession::new(mode.unwrap_or(self.default_mode));
        let id = session.id;
        tracing::info!(session = %id, mode = ?session.mode, "Checkout session started");

        let shared = Arc::new(Mutex::new(session));
        self.sessions.insert(id, shared.clone()).await;
        shared
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.get(id).await
    }

    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).await.is_some();
        if removed {
            tracing::info!(session = %id, "Checkout session discarded");
        }
        removed
    }

    pub fn active(&self) -> u64 {
        self.sessions.entry_count()
    }
}
