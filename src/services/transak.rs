use super::initiator::PaymentInitiator;
use crate::error::WidgetError;
use crate::models::{WidgetLaunch, WidgetSettings};
use reqwest::Url;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransakEnvironment {
    #[default]
    Staging,
    Production,
}

impl TransakEnvironment {
    fn base_url(&self) -> &'static str {
        match self {
            TransakEnvironment::Staging => "https://global-stg.transak.com",
            TransakEnvironment::Production => "https://global.transak.com",
        }
    }
}

impl FromStr for TransakEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STAGING" => Ok(TransakEnvironment::Staging),
            "PRODUCTION" => Ok(TransakEnvironment::Production),
            other => Err(format!("Unknown Transak environment: {}", other)),
        }
    }
}

/// Opens the hosted Transak widget with fixed merchant settings.
pub struct TransakInitiator {
    api_key: Option<String>,
    environment: TransakEnvironment,
    settings: WidgetSettings,
}

impl TransakInitiator {
    pub fn new(api_key: Option<String>, environment: TransakEnvironment, settings: WidgetSettings) -> Self {
        let api_key = api_key.filter(|key| !key.is_empty());
        if api_key.is_none() {
            tracing::warn!("TRANSAK_API_KEY not set, express payments will not open the widget");
        }

        Self {
            api_key,
            environment,
            settings,
        }
    }

    fn widget_url(&self, api_key: &str, fiat_amount: Decimal) -> Result<Url, WidgetError> {
        let settings = &self.settings;
        let amount = fiat_amount.normalize().to_string();

        Url::parse_with_params(
            self.environment.base_url(),
            &[
                ("apiKey", api_key),
                ("environment", self.environment_name()),
                ("defaultCryptoCurrency", settings.default_crypto_currency.as_str()),
                ("walletAddress", settings.wallet_address.as_str()),
                ("fiatAmount", amount.as_str()),
                ("fiatCurrency", settings.fiat_currency.as_str()),
                ("network", settings.network.as_str()),
                ("disableWalletAddressForm", flag(settings.disable_wallet_address_form)),
                ("disableCryptoCurrencyChange", flag(settings.disable_crypto_currency_change)),
                ("isFeeCalculationHidden", flag(settings.hide_fee_calculation)),
                ("themeColor", settings.theme_color.as_str()),
            ],
        )
        .map_err(|e| WidgetError::Init(e.to_string()))
    }

    fn environment_name(&self) -> &'static str {
        match self.environment {
            TransakEnvironment::Staging => "STAGING",
            TransakEnvironment::Production => "PRODUCTION",
        }
    }
}

impl PaymentInitiator for TransakInitiator {
    fn launch(&self, fiat_amount: Decimal) -> Result<WidgetLaunch, WidgetError> {
        let api_key = self.api_key.as_deref().ok_or(WidgetError::MissingApiKey)?;

        if fiat_amount <= Decimal::ZERO {
            return Err(WidgetError::InvalidAmount(fiat_amount.to_string()));
        }

        let url = self.widget_url(api_key, fiat_amount)?;

        tracing::info!(
            "Transak widget launched: {} {} to {} on {}",
            fiat_amount,
            self.settings.fiat_currency,
            self.settings.wallet_address,
            self.settings.network
        );

        Ok(WidgetLaunch {
            provider: "transak".to_string(),
            url: url.to_string(),
            fiat_amount,
            fiat_currency: self.settings.fiat_currency.clone(),
        })
    }

    fn ready(&self) -> bool {
        self.api_key.is_some()
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
