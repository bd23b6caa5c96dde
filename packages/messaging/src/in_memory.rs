use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use crate::broker::{Broker, Message, Subscription, Unsubscribe};
use crate::error::Error;

type Routes = HashMap<String, (String, mpsc::UnboundedSender<Message>)>;

struct Shared {
    // subscription id -> (destination, sender)
    routes: Mutex<Routes>,
    connected: watch::Sender<bool>,
    next_id: AtomicU64,
}

impl Shared {
    fn routes(&self) -> std::sync::MutexGuard<'_, Routes> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Unsubscribe for Shared {
    fn unsubscribe(&self, id: &str) {
        self.routes().remove(id);
    }
}

/// A broker that lives in the process.
///
/// Publishing delivers to every current subscriber of the destination.
/// The connection flag is driven by [`set_connected`](Self::set_connected);
/// going offline drops every subscription.
#[derive(Clone)]
pub struct InMemoryBroker {
    shared: Arc<Shared>,
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBroker {
    /// A connected broker.
    pub fn new() -> Self {
        let (connected, _) = watch::channel(true);
        Self {
            shared: Arc::new(Shared {
                routes: Mutex::new(HashMap::new()),
                connected,
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        if !connected {
            self.shared.routes().clear();
        }
        self.shared.connected.send_replace(connected);
    }

    pub fn subscriber_count(&self, destination: &str) -> usize {
        self.shared
            .routes()
            .values()
            .filter(|(d, _)| d == destination)
            .count()
    }
}

#[async_trait]
impl Broker for InMemoryBroker {
    async fn subscribe(&self, destination: &str) -> Result<Subscription, Error> {
        if !*self.shared.connected.borrow() {
            return Err(Error::NotConnected);
        }
        let id = format!("sub-{}", self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();
        self.shared
            .routes()
            .insert(id.clone(), (destination.to_string(), tx));

        let release: Arc<dyn Unsubscribe> = self.shared.clone();
        Ok(Subscription::new(id, destination, rx, release))
    }

    async fn publish(&self, message: Message) -> Result<(), Error> {
        if !*self.shared.connected.borrow() {
            return Err(Error::NotConnected);
        }
        let mut routes = self.shared.routes();
        routes.retain(|_, (destination, tx)| {
            destination != &message.destination || tx.send(message.clone()).is_ok()
        });
        Ok(())
    }

    fn connection(&self) -> watch::Receiver<bool> {
        self.shared.connected.subscribe()
    }
}
