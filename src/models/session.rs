use super::amount::{AmountInput, AmountMask};
use super::transaction::TransactionRecord;
use super::widget::WidgetLaunch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Which of the two checkout flows a session walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// Hosted widget or manual card entry.
    Express,
    /// Tap to pay, then a processing screen the merchant confirms.
    TapToPay,
}

impl CheckoutMode {
    pub fn amount_mask(&self) -> AmountMask {
        match self {
            CheckoutMode::Express => AmountMask::Lenient,
            CheckoutMode::TapToPay => AmountMask::Strict,
        }
    }

    /// Screen shown once the disclaimer has been accepted.
    pub fn payment_screen(&self) -> Screen {
        match self {
            CheckoutMode::Express => Screen::PaymentMethodSelect,
            CheckoutMode::TapToPay => Screen::TapToPay,
        }
    }
}

impl FromStr for CheckoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "express" => Ok(CheckoutMode::Express),
            "tap_to_pay" | "tap-to-pay" | "tap" => Ok(CheckoutMode::TapToPay),
            other => Err(format!("Unknown checkout mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Entry,
    Disclaimer,
    PaymentMethodSelect,
    ManualCardEntry,
    TapToPay,
    Processing,
    Receipt,
    History,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Entry => "entry",
            Screen::Disclaimer => "disclaimer",
            Screen::PaymentMethodSelect => "payment_method_select",
            Screen::ManualCardEntry => "manual_card_entry",
            Screen::TapToPay => "tap_to_pay",
            Screen::Processing => "processing",
            Screen::Receipt => "receipt",
            Screen::History => "history",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    #[serde(rename = "Pedicab Ride")]
    PedicabRide,
    #[serde(rename = "Delivery")]
    Delivery,
    #[serde(rename = "Other")]
    Other,
}

impl ServiceType {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::PedicabRide => "Pedicab Ride",
            ServiceType::Delivery => "Delivery",
            ServiceType::Other => "Other",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// State for one checkout attempt. Lives only in process memory.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: Uuid,
    pub mode: CheckoutMode,
    pub screen: Screen,
    pub amount: AmountInput,
    pub service: ServiceType,
    pub agreed: bool,
    /// Records loaded when the history screen was last entered.
    pub history: Vec<TransactionRecord>,
    /// Widget opened by the last express payment, cleared on the next event.
    pub widget: Option<WidgetLaunch>,
    pub created_at: DateTime<Utc>,
}

impl CheckoutSession {
    pub fn new(mode: CheckoutMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            screen: Screen::Entry,
            amount: AmountInput::new(),
            service: ServiceType::default(),
            agreed: false,
            history: Vec::new(),
            widget: None,
            created_at: Utc::now(),
        }
    }

    /// Clears the form fields. The screen is left alone.
    pub fn reset_form(&mut self) {
        self.amount.clear();
        self.service = ServiceType::default();
        self.agreed = false;
    }
}
