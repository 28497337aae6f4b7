use crate::flow::{ConfirmPolicy, ExpressOrdering, FlowPolicy, ResetPolicy};
use crate::models::CheckoutMode;
use crate::services::TransakEnvironment;
use anyhow::{bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Where transaction records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Supabase,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,

    // Transaction store
    pub store_backend: StoreBackend,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub store_timeout: Duration,

    // Payment widget
    pub transak_api_key: Option<String>,
    pub transak_environment: TransakEnvironment,

    // Checkout flow
    pub checkout_mode: CheckoutMode,
    pub flow_policy: FlowPolicy,
    pub session_idle: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let environment = Self::parse_environment()?;

        let reset = if Self::parse_var::<bool>("RESET_ON_NEW_PAYMENT", "true")? {
            ResetPolicy::Reset
        } else {
            ResetPolicy::Preserve
        };

        let config = Self {
            environment,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: Self::parse_var("PORT", "8080")?,

            store_backend: Self::parse_store_backend()?,
            supabase_url: Self::optional("SUPABASE_URL"),
            supabase_key: Self::optional("SUPABASE_ANON_KEY"),
            store_timeout: Duration::from_millis(Self::parse_var("STORE_TIMEOUT_MS", "5000")?),

            transak_api_key: Self::optional("TRANSAK_API_KEY"),
            transak_environment: Self::parse_with("TRANSAK_ENVIRONMENT", "STAGING")?,

            checkout_mode: Self::parse_with("CHECKOUT_MODE", "express")?,
            flow_policy: FlowPolicy {
                confirm: Self::parse_with::<ConfirmPolicy>("CONFIRM_POLICY", "optimistic")?,
                express_ordering: Self::parse_with::<ExpressOrdering>("EXPRESS_ORDERING", "detached")?,
                reset,
            },
            session_idle: Duration::from_secs(Self::parse_var("SESSION_IDLE_SECS", "1800")?),
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_environment() -> Result<Environment> {
        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        match env.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => bail!("Unknown environment: {}", env),
        }
    }

    fn parse_store_backend() -> Result<StoreBackend> {
        let backend = std::env::var("TRANSACTION_STORE").unwrap_or_else(|_| "supabase".to_string());

        match backend.to_lowercase().as_str() {
            "supabase" => Ok(StoreBackend::Supabase),
            "memory" | "in_memory" => Ok(StoreBackend::Memory),
            _ => bail!("Unknown transaction store: {}", backend),
        }
    }

    fn optional(var: &str) -> Option<String> {
        std::env::var(var).ok().filter(|value| !value.trim().is_empty())
    }

    fn parse_var<T>(var: &str, default: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        std::env::var(var)
            .unwrap_or_else(|_| default.to_string())
            .parse()
            .with_context(|| format!("Invalid {}", var))
    }

    /// Like `parse_var` for the crate's own enums, whose parse errors are
    /// plain strings.
    fn parse_with<T>(var: &str, default: &str) -> Result<T>
    where
        T: FromStr<Err = String>,
    {
        let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
        T::from_str(&raw).map_err(|e| anyhow::anyhow!("Invalid {}: {}", var, e))
    }

    /// Both halves of the Supabase connection, when present.
    pub fn supabase(&self) -> Option<(&str, &str)> {
        match (&self.supabase_url, &self.supabase_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.supabase_url {
            if !url.starts_with("http") {
                bail!("SUPABASE_URL must be HTTP(S) URL");
            }
        }

        if self.session_idle.is_zero() {
            bail!("SESSION_IDLE_SECS must be greater than zero");
        }

        if self.environment == Environment::Production
            && self.transak_environment == TransakEnvironment::Staging
        {
            tracing::warn!("Production environment is using the Transak staging widget");
        }

        tracing::info!("Configuration validated for {:?} environment", self.environment);

        Ok(())
    }
}
