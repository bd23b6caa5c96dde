//! Request/response effects.
//!
//! An effect bridges one command action to one boundary call and its two
//! outcomes:
//!
//! ```text
//! trigger action ──► call() ──┬─ Ok(response) ──► [info notification] ──► success action
//!                             ├─ Err(Service)  ──► feature error notification ──► failure action
//!                             └─ Err(General) / panic ──► general notification ──► failure action
//! ```
//!
//! Every trigger yields exactly one terminal action. The per-trigger pipeline
//! runs in its own task and is supervised by [`execute`], so even a panic
//! inside the service call is turned into the failure action instead of
//! escaping.

use std::sync::Arc;

use async_trait::async_trait;

use crate::action::Action;
use crate::notify::{Notification, Notifier};

/// Boxed error type carried by service failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// How a boundary call failed.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    /// The call completed with an error: transport failure, non-2xx status,
    /// an undecodable body, a broker error.
    #[error("service call failed: {0}")]
    Service(#[source] BoxError),

    /// Something went wrong on our side of the call.
    #[error("unexpected failure: {message}")]
    General { message: String },
}

impl EffectError {
    pub fn service(error: impl Into<BoxError>) -> Self {
        EffectError::Service(error.into())
    }

    pub fn general(message: impl Into<String>) -> Self {
        EffectError::General {
            message: message.into(),
        }
    }

    pub fn is_service(&self) -> bool {
        matches!(self, EffectError::Service(_))
    }
}

/// An effect translating one command into one boundary call.
///
/// Implementations describe the pieces; [`execute`] and
/// [`Store::register`](crate::Store::register) own the orchestration.
#[async_trait]
pub trait RequestEffect: Send + Sync + 'static {
    /// The application action type the effect listens to and produces.
    type Action: Action;
    /// Payload fields extracted from the trigger action.
    type Trigger: Send + 'static;
    /// Decoded response of the boundary call.
    type Response: Send + 'static;

    /// Name used in log events.
    fn name(&self) -> &'static str;

    /// Extract the call parameters if `action` is one of this effect's triggers.
    fn trigger(&self, action: &Self::Action) -> Option<Self::Trigger>;

    /// Perform the boundary call.
    async fn call(&self, trigger: Self::Trigger) -> Result<Self::Response, EffectError>;

    /// Map a successful response to the success action.
    fn succeeded(&self, response: Self::Response) -> Self::Action;

    /// The failure action emitted for any failure.
    fn failed(&self, error: Option<&EffectError>) -> Self::Action;

    /// Informational notification raised before the success action.
    fn success_notification(&self, _response: &Self::Response) -> Option<Notification> {
        None
    }

    /// Error notification raised for service failures.
    fn failure_notification(&self, error: &EffectError) -> Notification;
}

/// Run one trigger through `effect`, always producing exactly one action.
///
/// The pipeline is spawned as its own task. If that task panics or is
/// cancelled, the general failure notification is raised and the failure
/// action is returned in its place.
pub async fn execute<E: RequestEffect>(
    effect: Arc<E>,
    trigger: E::Trigger,
    notifier: Arc<dyn Notifier>,
) -> E::Action {
    let pipeline = {
        let effect = Arc::clone(&effect);
        let notifier = Arc::clone(&notifier);
        tokio::spawn(async move { respond(effect.as_ref(), trigger, notifier.as_ref()).await })
    };

    match pipeline.await {
        Ok(action) => action,
        Err(join_error) => {
            tracing::error!(
                effect = effect.name(),
                panicked = join_error.is_panic(),
                "effect pipeline aborted"
            );
            notifier.notify(Notification::general_failure());
            effect.failed(None)
        }
    }
}

async fn respond<E: RequestEffect>(
    effect: &E,
    trigger: E::Trigger,
    notifier: &dyn Notifier,
) -> E::Action {
    match effect.call(trigger).await {
        Ok(response) => {
            if let Some(notification) = effect.success_notification(&response) {
                notifier.notify(notification);
            }
            effect.succeeded(response)
        }
        Err(error) => {
            tracing::warn!(effect = effect.name(), %error, "effect call failed");
            let notification = match &error {
                EffectError::Service(_) => effect.failure_notification(&error),
                EffectError::General { .. } => Notification::general_failure(),
            };
            notifier.notify(notification);
            effect.failed(Some(&error))
        }
    }
}
