use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed merchant parameters the payment widget is opened with.
#[derive(Debug, Clone)]
pub struct WidgetSettings {
    pub default_crypto_currency: String,
    pub wallet_address: String,
    pub fiat_currency: String,
    pub network: String,
    pub disable_wallet_address_form: bool,
    pub disable_crypto_currency_change: bool,
    pub hide_fee_calculation: bool,
    pub theme_color: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            default_crypto_currency: "USDC".to_string(),
            wallet_address: "0x9C790a6144b691484cDe07919F7459c6d7D33e09".to_string(),
            fiat_currency: "USD".to_string(),
            network: "polygon".to_string(),
            disable_wallet_address_form: true,
            disable_crypto_currency_change: true,
            hide_fee_calculation: true,
            theme_color: "000000".to_string(),
        }
    }
}

/// A widget launch handed back to the browser. The outcome of the payment
/// itself is never reported back to this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetLaunch {
    pub provider: String,
    pub url: String,
    pub fiat_amount: Decimal,
    pub fiat_currency: String,
}
