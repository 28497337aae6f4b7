use super::event::CheckoutEvent;
use super::ResetPolicy;
use crate::error::FlowError;
use crate::models::{CheckoutSession, NewTransaction, Screen};

/// Side effect a transition needs before it is complete.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Record the transaction and open the payment widget, then show the
    /// receipt.
    ExpressPayment(NewTransaction),
    /// Record the transaction, then show the receipt.
    ConfirmPayment(NewTransaction),
    /// The session is on the history screen and needs the transaction list.
    LoadHistory,
}

/// Applies `event` to `session`.
///
/// Form edits and plain screen changes are written straight into the
/// session. Record-creating events leave the screen where it is and return
/// the transaction to record; the caller moves to the receipt once the
/// effect has been handled. On error the session is untouched.
pub fn apply(
    session: &mut CheckoutSession,
    event: &CheckoutEvent,
    reset: ResetPolicy,
) -> Result<Effect, FlowError> {
    // History is reachable from every screen.
    if let CheckoutEvent::ViewHistory = event {
        session.screen = Screen::History;
        return Ok(Effect::LoadHistory);
    }

    match (session.screen, event) {
        (Screen::Entry, CheckoutEvent::PressKey { key }) => {
            if !session.amount.push(*key, session.mode.amount_mask()) {
                tracing::debug!(session = %session.id, key = %key, "Keystroke dropped by amount mask");
            }
        }
        (Screen::Entry, CheckoutEvent::Clear) => session.amount.clear(),
        (Screen::Entry, CheckoutEvent::SelectService { service }) => session.service = *service,
        (Screen::Entry, CheckoutEvent::Continue) => session.screen = Screen::Disclaimer,

        (Screen::Disclaimer, CheckoutEvent::ToggleAgreement) => session.agreed = !session.agreed,
        (Screen::Disclaimer, CheckoutEvent::Proceed) => {
            if session.agreed {
                session.screen = session.mode.payment_screen();
            } else {
                tracing::debug!(session = %session.id, "Proceed ignored until the agreement is accepted");
            }
        }

        (Screen::PaymentMethodSelect, CheckoutEvent::ExpressPay) => {
            return payable(session).map(Effect::ExpressPayment);
        }
        (Screen::PaymentMethodSelect, CheckoutEvent::ManualCard) => {
            session.screen = Screen::ManualCardEntry;
        }
        (Screen::ManualCardEntry, CheckoutEvent::SubmitCard(_)) => session.screen = Screen::Receipt,

        (Screen::TapToPay, CheckoutEvent::SimulateSuccess) => session.screen = Screen::Processing,
        (Screen::Processing, CheckoutEvent::Confirm) => {
            return payable(session).map(Effect::ConfirmPayment);
        }

        (Screen::History, CheckoutEvent::NewPayment) => {
            if reset == ResetPolicy::Reset {
                session.reset_form();
            }
            session.screen = Screen::Entry;
        }

        (screen, event) => {
            return Err(FlowError::InvalidTransition {
                screen,
                event: event.name(),
            });
        }
    }

    Ok(Effect::None)
}

/// The transaction a payment on this session would record.
fn payable(session: &CheckoutSession) -> Result<NewTransaction, FlowError> {
    if !session.agreed {
        return Err(FlowError::AgreementRequired);
    }

    let amount = session
        .amount
        .positive()
        .ok_or_else(|| FlowError::AmountNotPositive(session.amount.as_str().to_string()))?;

    Ok(NewTransaction::paid(amount, session.service))
}
