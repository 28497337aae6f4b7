use super::event::CheckoutEvent;
use super::machine::{self, Effect};
use super::{ConfirmPolicy, ExpressOrdering, FlowPolicy};
use crate::error::FlowError;
use crate::models::{CheckoutSession, NewTransaction, Screen};
use crate::services::{PaymentInitiator, TransactionRecorder};
use std::sync::Arc;

/// Drives checkout sessions through the screen flow and carries out the
/// side effects transitions ask for.
#[derive(Clone)]
pub struct CheckoutController {
    recorder: Arc<dyn TransactionRecorder>,
    initiator: Arc<dyn PaymentInitiator>,
    policy: FlowPolicy,
}

impl CheckoutController {
    pub fn new(
        recorder: Arc<dyn TransactionRecorder>,
        initiator: Arc<dyn PaymentInitiator>,
        policy: FlowPolicy,
    ) -> Self {
        tracing::info!(
            "Checkout controller ready (confirm: {:?}, express: {:?}, reset: {:?})",
            policy.confirm,
            policy.express_ordering,
            policy.reset
        );

        Self {
            recorder,
            initiator,
            policy,
        }
    }

    pub fn policy(&self) -> FlowPolicy {
        self.policy
    }

    pub fn recorder(&self) -> &Arc<dyn TransactionRecorder> {
        &self.recorder
    }

    pub fn initiator(&self) -> &Arc<dyn PaymentInitiator> {
        &self.initiator
    }

    /// Applies one user event to `session`.
    ///
    /// A rejected event leaves the session as it was, with one exception: a
    /// store failure under [`ConfirmPolicy::BlockOnFailure`] keeps the
    /// session on the processing screen and is returned as the error.
    pub async fn dispatch(&self, session: &mut CheckoutSession, event: CheckoutEvent) -> Result<(), FlowError> {
        let from = session.screen;
        let effect = machine::apply(session, &event, self.policy.reset)?;
        session.widget = None;

        match effect {
            Effect::None => {}
            Effect::ExpressPayment(tx) => self.express_payment(session, tx).await,
            Effect::ConfirmPayment(tx) => self.confirm_payment(session, tx).await?,
            Effect::LoadHistory => self.load_history(session).await,
        }

        tracing::debug!(
            session = %session.id,
            event = event.name(),
            from = %from,
            to = %session.screen,
            "Checkout event applied"
        );

        Ok(())
    }

    async fn express_payment(&self, session: &mut CheckoutSession, tx: NewTransaction) {
        let amount = tx.amount;
        let session_id = session.id;

        match self.policy.express_ordering {
            ExpressOrdering::Detached => {
                let recorder = self.recorder.clone();
                tokio::spawn(async move {
                    if let Err(e) = recorder.insert(tx).await {
                        tracing::error!(session = %session_id, "Insert error: {}", e);
                    }
                });
            }
            ExpressOrdering::AwaitInsert => {
                if let Err(e) = self.recorder.insert(tx).await {
                    tracing::error!(session = %session_id, "Insert error: {}", e);
                }
            }
        }

        match self.initiator.launch(amount) {
            Ok(launch) => session.widget = Some(launch),
            Err(e) => tracing::error!(session = %session_id, "Payment widget failed to open: {}", e),
        }

        session.screen = Screen::Receipt;
    }

    async fn confirm_payment(&self, session: &mut CheckoutSession, tx: NewTransaction) -> Result<(), FlowError> {
        match self.recorder.insert(tx).await {
            Ok(()) => {}
            Err(e) => match self.policy.confirm {
                ConfirmPolicy::Optimistic => {
                    tracing::error!(session = %session.id, "Insert error: {}, showing receipt anyway", e);
                }
                ConfirmPolicy::BlockOnFailure => {
                    tracing::error!(session = %session.id, "Insert error: {}, staying on processing", e);
                    return Err(FlowError::Store(e));
                }
            },
        }

        session.screen = Screen::Receipt;
        Ok(())
    }

    async fn load_history(&self, session: &mut CheckoutSession) {
        match self.recorder.list_recent().await {
            Ok(records) => session.history = records,
            Err(e) => {
                tracing::error!(session = %session.id, "Error loading transactions: {}", e);
                session.history.clear();
            }
        }
    }
}
