use crate::models::ServiceType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One user action on the checkout screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckoutEvent {
    PressKey { key: char },
    Clear,
    SelectService { service: ServiceType },
    Continue,
    ToggleAgreement,
    Proceed,
    ExpressPay,
    ManualCard,
    SubmitCard(CardFields),
    SimulateSuccess,
    Confirm,
    ViewHistory,
    NewPayment,
}

impl CheckoutEvent {
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutEvent::PressKey { .. } => "press_key",
            CheckoutEvent::Clear => "clear",
            CheckoutEvent::SelectService { .. } => "select_service",
            CheckoutEvent::Continue => "continue",
            CheckoutEvent::ToggleAgreement => "toggle_agreement",
            CheckoutEvent::Proceed => "proceed",
            CheckoutEvent::ExpressPay => "express_pay",
            CheckoutEvent::ManualCard => "manual_card",
            CheckoutEvent::SubmitCard(_) => "submit_card",
            CheckoutEvent::SimulateSuccess => "simulate_success",
            CheckoutEvent::Confirm => "confirm",
            CheckoutEvent::ViewHistory => "view_history",
            CheckoutEvent::NewPayment => "new_payment",
        }
    }
}

/// Fields of the manual card form. Accepted and dropped: nothing validates,
/// stores or forwards them.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFields {
    pub card_number: Option<String>,
    pub expiry: Option<String>,
    pub cvc: Option<String>,
}

impl fmt::Debug for CardFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CardFields { .. }")
    }
}
