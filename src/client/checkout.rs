use crate::error::ErrorResponse;
use crate::flow::{CardFields, CheckoutEvent};
use crate::models::{ApiResponse, CheckoutMode, Screen, ServiceType, SessionView, TransactionRecord};
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

/// HTTP client for a running checkout service. Walks the same screens a
/// merchant would tap through.
pub struct CheckoutClient {
    base_url: String,
    client: reqwest::Client,
}

impl CheckoutClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(error) => bail!("{} ({}): {}", error.error_code, status, error.error),
                Err(_) => bail!("Request failed ({}): {}", status, text),
            }
        }

        let body: ApiResponse<T> = response.json().await.context("Unreadable response body")?;
        Ok(body.data)
    }

    pub async fn start(&self, mode: Option<CheckoutMode>) -> Result<SessionView> {
        let response = self
            .client
            .post(format!("{}/api/sessions", self.base_url))
            .json(&json!({ "mode": mode }))
            .send()
            .await?;

        Self::decode(response).await
    }

    pub async fn send(&self, id: Uuid, event: &CheckoutEvent) -> Result<SessionView> {
        let response = self
            .client
            .post(format!("{}/api/sessions/{}/events", self.base_url, id))
            .json(event)
            .send()
            .await?;

        Self::decode(response)
            .await
            .with_context(|| format!("Event '{}' failed", event.name()))
    }

    pub async fn history(&self) -> Result<Vec<TransactionRecord>> {
        let response = self
            .client
            .get(format!("{}/api/transactions", self.base_url))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Keys in `amount`, accepts the disclaimer and pays. Returns the
    /// receipt screen.
    pub async fn run_checkout(
        &self,
        mode: Option<CheckoutMode>,
        amount: &str,
        service: ServiceType,
    ) -> Result<SessionView> {
        let session = self.start(mode).await?;
        let id = session.id;
        tracing::info!("Session {} started in {:?} mode", id, session.mode);

        let mut view = session;
        for key in amount.chars() {
            view = self.send(id, &CheckoutEvent::PressKey { key }).await?;
        }
        if view.amount != amount {
            tracing::warn!("Keypad accepted '{}' of '{}'", view.amount, amount);
        }

        self.send(id, &CheckoutEvent::SelectService { service }).await?;
        self.send(id, &CheckoutEvent::Continue).await?;
        self.send(id, &CheckoutEvent::ToggleAgreement).await?;
        view = self.send(id, &CheckoutEvent::Proceed).await?;

        let steps: Vec<CheckoutEvent> = match view.screen {
            Screen::PaymentMethodSelect => vec![CheckoutEvent::ExpressPay],
            Screen::TapToPay => vec![CheckoutEvent::SimulateSuccess, CheckoutEvent::Confirm],
            other => bail!("Unexpected screen after disclaimer: {}", other),
        };

        for step in steps {
            view = self.send(id, &step).await?;
        }

        if view.screen != Screen::Receipt {
            bail!("Checkout ended on {} instead of the receipt", view.screen);
        }

        Ok(view)
    }

    /// Manual card path. Card fields are sent but never kept by the service.
    pub async fn pay_by_card(&self, id: Uuid, card: CardFields) -> Result<SessionView> {
        self.send(id, &CheckoutEvent::ManualCard).await?;
        self.send(id, &CheckoutEvent::SubmitCard(card)).await
    }
}
