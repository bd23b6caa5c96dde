//! # comicdesk-messaging
//!
//! Server push and request/reply over a message broker.
//!
//! - [`frame`]: STOMP 1.2 frame encoding and parsing
//! - [`Broker`]: subscribe/publish plus a connection flag, implemented by
//!   [`StompBroker`] (STOMP over a WebSocket) and [`InMemoryBroker`]
//! - [`request`]: publish with a one-off `reply-to` topic and await the reply
//! - [`ScopedSubscription`] / [`spawn_scoped`]: subscriptions that exist
//!   exactly while the broker is connected

pub mod broker;
pub mod error;
pub mod frame;
pub mod in_memory;
pub mod stomp;
pub mod subscription;

pub use broker::{request, Broker, Message, Subscription, Unsubscribe, REPLY_TOPIC_PREFIX};
pub use error::Error;
pub use frame::{Command, Frame};
pub use in_memory::InMemoryBroker;
pub use stomp::{ConnectOptions, StompBroker, DEFAULT_CONNECT_TIMEOUT};
pub use subscription::{spawn_scoped, ScopedSubscription};
