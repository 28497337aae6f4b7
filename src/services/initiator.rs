use crate::error::WidgetError;
use crate::models::WidgetLaunch;
use rust_decimal::Decimal;

/// Third-party payment widget.
///
/// A launch only prepares the widget for the browser; whether the payment
/// then succeeds is never reported back.
pub trait PaymentInitiator: Send + Sync {
    fn launch(&self, fiat_amount: Decimal) -> Result<WidgetLaunch, WidgetError>;

    /// Whether launches can currently succeed.
    fn ready(&self) -> bool;
}
