//! The broker abstraction shared by the STOMP and in-memory transports.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use crate::error::Error;

/// Prefix of per-request reply destinations.
pub const REPLY_TOPIC_PREFIX: &str = "/topic/reply.";

/// A message published to, or delivered from, a destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub destination: String,
    pub reply_to: Option<String>,
    pub body: serde_json::Value,
}

impl Message {
    pub fn new(destination: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            destination: destination.into(),
            reply_to: None,
            body,
        }
    }

    pub fn json(destination: impl Into<String>, body: &impl Serialize) -> Result<Self, Error> {
        Ok(Self::new(destination, serde_json::to_value(body)?))
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Decode the body.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

/// Release hook a [`Subscription`] calls when it is dropped.
pub trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: &str);
}

/// A live subscription to one destination.
///
/// Dropping it releases the subscription on the broker.
pub struct Subscription {
    id: String,
    destination: String,
    messages: mpsc::UnboundedReceiver<Message>,
    release: Option<Arc<dyn Unsubscribe>>,
}

impl Subscription {
    pub fn new(
        id: impl Into<String>,
        destination: impl Into<String>,
        messages: mpsc::UnboundedReceiver<Message>,
        release: Arc<dyn Unsubscribe>,
    ) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            messages,
            release: Some(release),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The next delivered message, or `None` once the broker dropped us.
    pub async fn next(&mut self) -> Option<Message> {
        self.messages.recv().await
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::debug!(id = %self.id, destination = %self.destination, "unsubscribing");
            release.unsubscribe(&self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("destination", &self.destination)
            .finish_non_exhaustive()
    }
}

/// A publish/subscribe message broker.
#[async_trait]
pub trait Broker: Send + Sync + 'static {
    async fn subscribe(&self, destination: &str) -> Result<Subscription, Error>;

    async fn publish(&self, message: Message) -> Result<(), Error>;

    /// Connection status; `true` while the session is usable.
    fn connection(&self) -> watch::Receiver<bool>;

    fn is_connected(&self) -> bool {
        *self.connection().borrow()
    }
}

/// Publish `body` to `destination` and wait for the first reply.
///
/// The reply destination is a fresh `/topic/reply.<uuid>`; its subscription
/// is released once the reply arrives or the wait times out.
pub async fn request(
    broker: &dyn Broker,
    destination: &str,
    body: serde_json::Value,
    timeout: Duration,
) -> Result<Message, Error> {
    let reply_to = format!("{}{}", REPLY_TOPIC_PREFIX, Uuid::new_v4());
    let mut replies = broker.subscribe(&reply_to).await?;

    broker
        .publish(Message::new(destination, body).with_reply_to(&reply_to))
        .await?;

    match tokio::time::timeout(timeout, replies.next()).await {
        Ok(Some(reply)) => Ok(reply),
        Ok(None) => Err(Error::Closed),
        Err(_) => Err(Error::Timeout {
            destination: destination.to_string(),
            after: timeout,
        }),
    }
}
