use super::session::{CheckoutMode, CheckoutSession, Screen, ServiceType};
use super::transaction::{TransactionRecord, PLACEHOLDER_CRYPTO_TX};
use super::widget::WidgetLaunch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: Utc::now(),
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub checkout_mode: CheckoutMode,
    pub store: bool,
    pub widget: bool,
    pub active_sessions: u64,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Receipt {
    pub service: ServiceType,
    pub amount: String,
    pub status: String,
    pub tx_hash: String,
}

/// Everything a client needs to draw the current screen.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionView {
    pub id: Uuid,
    pub mode: CheckoutMode,
    pub screen: Screen,
    pub amount: String,
    pub display_amount: String,
    pub service: ServiceType,
    pub agreed: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub receipt: Option<Receipt>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub history: Option<Vec<TransactionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub widget: Option<WidgetLaunch>,
    pub created_at: DateTime<Utc>,
}

impl From<&CheckoutSession> for SessionView {
    fn from(session: &CheckoutSession) -> Self {
        let receipt = (session.screen == Screen::Receipt).then(|| Receipt {
            service: session.service,
            amount: session.amount.as_str().to_string(),
            status: "USDC Received".to_string(),
            tx_hash: PLACEHOLDER_CRYPTO_TX.to_string(),
        });

        let history = (session.screen == Screen::History).then(|| session.history.clone());

        Self {
            id: session.id,
            mode: session.mode,
            screen: session.screen,
            amount: session.amount.as_str().to_string(),
            display_amount: session.amount.display().to_string(),
            service: session.service,
            agreed: session.agreed,
            receipt,
            history,
            widget: session.widget.clone(),
            created_at: session.created_at,
        }
    }
}
