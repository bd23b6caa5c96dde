//! Subscriptions that follow the broker's connection status.
//!
//! ```text
//!                connected
//! Unsubscribed ─────────────► Subscribed
//!      ▲                          │
//!      └──────────────────────────┘
//!        disconnected / closed / dropped
//! ```

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::broker::{Broker, Message, Subscription};
use crate::error::Error;

#[derive(Debug)]
enum State {
    Unsubscribed,
    Subscribed(Subscription),
}

/// One destination, subscribed exactly while the broker is connected.
#[derive(Debug)]
pub struct ScopedSubscription {
    destination: String,
    state: State,
}

impl ScopedSubscription {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            state: State::Unsubscribed,
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self.state, State::Subscribed(_))
    }

    /// Subscribe on connect, release on disconnect. Repeated calls with the
    /// same status do nothing.
    pub async fn on_connection_changed(
        &mut self,
        broker: &dyn Broker,
        connected: bool,
    ) -> Result<(), Error> {
        match (&self.state, connected) {
            (State::Unsubscribed, true) => {
                let subscription = broker.subscribe(&self.destination).await?;
                tracing::debug!(destination = %self.destination, "scoped subscription active");
                self.state = State::Subscribed(subscription);
            }
            (State::Subscribed(_), false) => self.release(),
            _ => {}
        }
        Ok(())
    }

    /// Drop the live subscription, if any.
    pub fn release(&mut self) {
        if let State::Subscribed(subscription) =
            std::mem::replace(&mut self.state, State::Unsubscribed)
        {
            tracing::debug!(destination = %self.destination, "scoped subscription released");
            subscription.unsubscribe();
        }
    }

    /// The next message, or `None` when not subscribed or the broker closed
    /// the subscription.
    pub async fn next(&mut self) -> Option<Message> {
        match &mut self.state {
            State::Subscribed(subscription) => subscription.next().await,
            State::Unsubscribed => None,
        }
    }
}

/// Keep `destination` subscribed while `broker` is connected and hand every
/// message to `deliver`.
///
/// Aborting the returned task releases the subscription.
pub fn spawn_scoped<F>(
    broker: Arc<dyn Broker>,
    destination: impl Into<String>,
    deliver: F,
) -> JoinHandle<()>
where
    F: Fn(Message) + Send + Sync + 'static,
{
    let mut scoped = ScopedSubscription::new(destination);
    tokio::spawn(async move {
        let mut connection = broker.connection();
        loop {
            let connected = *connection.borrow_and_update();
            if let Err(error) = scoped.on_connection_changed(broker.as_ref(), connected).await {
                tracing::warn!(destination = %scoped.destination(), %error, "subscribe failed");
            }

            if scoped.is_subscribed() {
                tokio::select! {
                    changed = connection.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    message = scoped.next() => match message {
                        Some(message) => deliver(message),
                        None => {
                            // Closed underneath us; wait for the status to move.
                            scoped.release();
                            if connection.changed().await.is_err() {
                                break;
                            }
                        }
                    },
                }
            } else if connection.changed().await.is_err() {
                break;
            }
        }
        scoped.release();
    })
}
