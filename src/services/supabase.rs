use super::recorder::TransactionRecorder;
use crate::error::StoreError;
use crate::models::{NewTransaction, TransactionRecord};
use async_trait::async_trait;
use std::time::Duration;

const TABLE: &str = "transactions";

/// Transaction recorder backed by a hosted Supabase table, spoken to over
/// its PostgREST interface.
pub struct SupabaseRecorder {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl SupabaseRecorder {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        tracing::info!("Supabase transaction store configured at {}", base_url);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        })
    }
}

#[async_trait]
impl TransactionRecorder for SupabaseRecorder {
    async fn insert(&self, record: NewTransaction) -> Result<(), StoreError> {
        let response = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=minimal")
            .json(&record)
            .send()
            .await?;

        Self::check(response).await?;

        tracing::info!(
            "Transaction recorded: {} for {} ({})",
            record.amount,
            record.service,
            record.crypto_tx
        );
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let response = self
            .authorized(self.client.get(self.table_url()))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        let response = Self::check(response).await?;
        let body = response.bytes().await?;
        let records: Vec<TransactionRecord> =
            serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))?;

        tracing::debug!("Loaded {} transactions from Supabase", records.len());
        Ok(records)
    }

    async fn ping(&self) -> bool {
        let result = self
            .authorized(self.client.get(self.table_url()))
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Supabase ping failed: {}", e);
                false
            }
        }
    }
}
