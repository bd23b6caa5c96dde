//! Bootstrap: one store, every effect, and the push connection.

use std::sync::Arc;

use comicdesk_http::{ApiClient, HttpExecutor, ReqwestExecutor};
use comicdesk_messaging::{spawn_scoped, Broker, Message, StompBroker};
use comicdesk_store::{Action, EffectHandle, Notifier};
use tokio::task::JoinHandle;

use crate::blocked_pages::{self, BlockedPagesAction};
use crate::config::ClientConfig;
use crate::error::Error;
use crate::last_read::{self, LastReadAction};
use crate::messaging::MessagingAction;
use crate::state::{self, AppAction, AppState, AppStore};
use crate::{comic_book, comic_import, reading_lists, rest_audit_log, scraping};

type Decode = fn(&Message) -> Result<AppAction, comicdesk_messaging::Error>;

/// A server-pushed topic and how its messages become actions.
struct Topic {
    destination: &'static str,
    decode: Decode,
}

const TOPICS: &[Topic] = &[
    Topic {
        destination: blocked_pages::UPDATE_TOPIC,
        decode: blocked_page_updated,
    },
    Topic {
        destination: blocked_pages::REMOVAL_TOPIC,
        decode: blocked_page_removed,
    },
    Topic {
        destination: last_read::UPDATE_TOPIC,
        decode: last_read_updated,
    },
    Topic {
        destination: last_read::REMOVAL_TOPIC,
        decode: last_read_removed,
    },
];

fn blocked_page_updated(message: &Message) -> Result<AppAction, comicdesk_messaging::Error> {
    Ok(BlockedPagesAction::EntryUpdated {
        entry: message.decode()?,
    }
    .into())
}

fn blocked_page_removed(message: &Message) -> Result<AppAction, comicdesk_messaging::Error> {
    Ok(BlockedPagesAction::EntryRemoved {
        entry: message.decode()?,
    }
    .into())
}

fn last_read_updated(message: &Message) -> Result<AppAction, comicdesk_messaging::Error> {
    Ok(LastReadAction::EntryUpdated {
        entry: message.decode()?,
    }
    .into())
}

fn last_read_removed(message: &Message) -> Result<AppAction, comicdesk_messaging::Error> {
    Ok(LastReadAction::EntryRemoved {
        entry: message.decode()?,
    }
    .into())
}

/// The client library: store, effects and optional server push.
///
/// Must be created inside a Tokio runtime; effects run as tasks on it.
/// Dropping the library stops its effect listeners and push tasks.
pub struct Library {
    config: ClientConfig,
    client: ApiClient,
    store: AppStore,
    effects: Vec<EffectHandle>,
    push: Vec<JoinHandle<()>>,
}

impl Library {
    pub fn new(
        config: ClientConfig,
        executor: Arc<dyn HttpExecutor>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, Error> {
        let client = ApiClient::new(&config.base_url, executor)?;
        let store = state::new_store();

        let mut effects = Vec::new();
        effects.extend(blocked_pages::effects::register(&store, &client, &notifier));
        effects.extend(rest_audit_log::effects::register(&store, &client, &notifier));
        effects.extend(comic_import::effects::register(
            &store,
            &client,
            &notifier,
            config.import_maximum,
        ));
        effects.extend(comic_book::effects::register(&store, &client, &notifier));
        effects.extend(reading_lists::effects::register(&store, &client, &notifier));
        effects.extend(scraping::effects::register(&store, &client, &notifier));
        effects.extend(last_read::effects::register(&store, &client, &notifier));

        tracing::debug!(
            base_url = %client.base_url(),
            effects = effects.len(),
            "library started"
        );

        Ok(Self {
            config,
            client,
            store,
            effects,
            push: Vec::new(),
        })
    }

    /// A library talking to the server over HTTP.
    pub fn connect(config: ClientConfig, notifier: Arc<dyn Notifier>) -> Result<Self, Error> {
        let executor = ReqwestExecutor::new(config.timeout)?;
        Self::new(config, Arc::new(executor), notifier)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn state(&self) -> Arc<AppState> {
        self.store.state()
    }

    pub fn dispatch(&self, action: impl Into<AppAction>) -> Arc<AppState> {
        self.store.dispatch(action)
    }

    /// Dispatch a server command and wait for its result action.
    ///
    /// The result is the first success or failure of `command`'s own kind
    /// dispatched after it. Results of other in-flight commands are skipped.
    pub async fn run(&self, command: impl Into<AppAction>) -> Result<AppAction, Error> {
        let command = command.into();
        if !command.calls_server() {
            return Err(Error::NotARequest {
                action: command.action_type(),
            });
        }

        let mut actions = self.store.listen();
        self.store.dispatch(command.clone());

        while let Some(action) = actions.recv().await {
            if action.answers(&command) {
                return Ok(action);
            }
        }
        Err(Error::StoreClosed)
    }

    /// Start mirroring `broker` into the store.
    ///
    /// Dispatches `Started`, then `Connected`/`Disconnected` whenever the
    /// broker's connection flag moves, and keeps every pushed topic
    /// subscribed while connected. Replaces any broker attached before.
    pub fn attach_broker(&mut self, broker: Arc<dyn Broker>) {
        self.detach_broker();
        self.store.dispatch(MessagingAction::Started);

        let store = self.store.downgrade();
        let mut connection = broker.connection();
        self.push.push(tokio::spawn(async move {
            loop {
                let connected = *connection.borrow_and_update();
                let Some(store) = store.upgrade() else {
                    break;
                };
                if store.state().messaging.connected != connected {
                    store.dispatch(if connected {
                        MessagingAction::Connected
                    } else {
                        MessagingAction::Disconnected
                    });
                }
                drop(store);

                if connection.changed().await.is_err() {
                    break;
                }
            }
        }));

        for topic in TOPICS {
            let store = self.store.downgrade();
            let decode = topic.decode;
            let task = spawn_scoped(Arc::clone(&broker), topic.destination, move |message| {
                match decode(&message) {
                    Ok(action) => {
                        if let Some(store) = store.upgrade() {
                            store.dispatch(action);
                        }
                    }
                    Err(error) => {
                        tracing::warn!(
                            destination = %message.destination,
                            %error,
                            "dropping pushed message"
                        );
                    }
                }
            });
            self.push.push(task);
        }
    }

    /// Connect to the configured STOMP endpoint and attach it.
    ///
    /// Returns `Ok(false)` when no WebSocket URL is configured.
    pub async fn connect_push(&mut self) -> Result<bool, Error> {
        let Some(url) = self.config.websocket_url.clone() else {
            return Ok(false);
        };
        let broker = StompBroker::connect(&url).await?;
        tracing::info!(%url, "push connected");
        self.attach_broker(Arc::new(broker));
        Ok(true)
    }

    /// Stop the push tasks, releasing their subscriptions.
    pub fn detach_broker(&mut self) {
        if self.push.is_empty() {
            return;
        }
        for task in self.push.drain(..) {
            task.abort();
        }
        self.store.dispatch(MessagingAction::Stopped);
    }

    pub fn effect_names(&self) -> Vec<&'static str> {
        self.effects.iter().map(EffectHandle::name).collect()
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        for task in &self.push {
            task.abort();
        }
    }
}
