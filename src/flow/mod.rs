//! Checkout screen flow.
//!
//! `machine` holds the transition table and guards and never performs I/O.
//! `controller` runs the side effects a transition asks for (recording a
//! transaction, opening the payment widget, loading history) against the
//! injected recorder and initiator.

pub mod controller;
pub mod event;
pub mod machine;

pub use controller::CheckoutController;
pub use event::{CardFields, CheckoutEvent};
pub use machine::Effect;

use std::str::FromStr;

/// What happens when the awaited insert behind `confirm` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmPolicy {
    /// Log the failure and show the receipt anyway.
    #[default]
    Optimistic,
    /// Stay on the processing screen and report the failure.
    BlockOnFailure,
}

impl FromStr for ConfirmPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "optimistic" => Ok(ConfirmPolicy::Optimistic),
            "block" | "block_on_failure" => Ok(ConfirmPolicy::BlockOnFailure),
            other => Err(format!("Unknown confirm policy: {}", other)),
        }
    }
}

/// Whether an express payment waits for its insert before the receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpressOrdering {
    /// Insert runs on a detached task and races the screen change.
    #[default]
    Detached,
    /// Insert completes (or fails and is logged) before the receipt.
    AwaitInsert,
}

impl FromStr for ExpressOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detached" => Ok(ExpressOrdering::Detached),
            "await" | "await_insert" => Ok(ExpressOrdering::AwaitInsert),
            other => Err(format!("Unknown express ordering: {}", other)),
        }
    }
}

/// Whether "new payment" clears amount, service and agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    #[default]
    Reset,
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowPolicy {
    pub confirm: ConfirmPolicy,
    pub express_ordering: ExpressOrdering,
    pub reset: ResetPolicy,
}
