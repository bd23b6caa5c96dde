//! STOMP 1.2 over a WebSocket.
//!
//! One reader task routes `MESSAGE` frames to subscriptions by their
//! `subscription` header; one writer task owns the socket sink. Either side
//! ending (socket closed, `ERROR` frame, broker dropped) flips the connection
//! flag to `false` and ends every subscription.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::broker::{Broker, Message, Subscription, Unsubscribe};
use crate::error::Error;
use crate::frame::{Command, Frame};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Value of the `host` header; the server's virtual host.
    pub host: String,
    pub login: Option<String>,
    pub passcode: Option<String>,
    pub timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            host: "/".to_string(),
            login: None,
            passcode: None,
            timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type SocketSink = SplitSink<Socket, WsMessage>;
type SocketStream = SplitStream<Socket>;

type Routes = HashMap<String, (String, mpsc::UnboundedSender<Message>)>;

struct Shared {
    outgoing: mpsc::UnboundedSender<Frame>,
    routes: Mutex<Routes>,
    connected: watch::Sender<bool>,
    next_id: AtomicU64,
}

impl Shared {
    fn routes(&self) -> std::sync::MutexGuard<'_, Routes> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, frame: Frame) -> Result<(), Error> {
        self.outgoing.send(frame).map_err(|_| Error::NotConnected)
    }

    fn disconnected(&self) {
        if self.connected.send_replace(false) {
            tracing::info!("broker connection lost");
        }
        self.routes().clear();
    }
}

impl Unsubscribe for Shared {
    fn unsubscribe(&self, id: &str) {
        if self.routes().remove(id).is_some() {
            let frame = Frame::new(Command::Unsubscribe).with_header("id", id);
            // Nothing to release on the server once the session is gone.
            let _ = self.send(frame);
        }
    }
}

pub struct StompBroker {
    shared: Arc<Shared>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl StompBroker {
    pub async fn connect(url: &str) -> Result<Self, Error> {
        Self::connect_with(url, ConnectOptions::default()).await
    }

    /// Open the WebSocket and complete the `CONNECT`/`CONNECTED` handshake.
    pub async fn connect_with(url: &str, options: ConnectOptions) -> Result<Self, Error> {
        let (mut sink, mut stream) =
            tokio::time::timeout(options.timeout, handshake(url, &options))
                .await
                .map_err(|_| Error::Timeout {
                    destination: url.to_string(),
                    after: options.timeout,
                })??;

        let (outgoing, mut frames) = mpsc::unbounded_channel::<Frame>();
        let (connected, _) = watch::channel(true);
        let shared = Arc::new(Shared {
            outgoing,
            routes: Mutex::new(HashMap::new()),
            connected,
            next_id: AtomicU64::new(0),
        });

        let writer = {
            let shared = Arc::clone(&shared);
            tokio::spawn(async move {
                while let Some(frame) = frames.recv().await {
                    let last = frame.command == Command::Disconnect;
                    if let Err(error) = sink.send(WsMessage::Text(frame.encode())).await {
                        tracing::warn!(%error, "failed to write frame");
                        break;
                    }
                    if last {
                        break;
                    }
                }
                let _ = sink.close().await;
                shared.disconnected();
            })
        };

        let reader = {
            let shared = Arc::clone(&shared);
            tokio::spawn(async move {
                while let Some(next) = stream.next().await {
                    let text = match next {
                        Ok(WsMessage::Text(text)) => text,
                        Ok(WsMessage::Close(_)) => break,
                        Ok(_) => continue,
                        Err(error) => {
                            tracing::warn!(%error, "broker socket failed");
                            break;
                        }
                    };
                    match Frame::parse(&text) {
                        Ok(Some(frame)) => {
                            if !route(&shared, frame) {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(error) => tracing::warn!(%error, "dropping malformed frame"),
                    }
                }
                shared.disconnected();
            })
        };

        Ok(Self {
            shared,
            reader,
            writer,
        })
    }

    /// Send `DISCONNECT` and close the socket.
    pub fn disconnect(&self) {
        let _ = self.shared.send(Frame::new(Command::Disconnect));
    }
}

async fn handshake(
    url: &str,
    options: &ConnectOptions,
) -> Result<(SocketSink, SocketStream), Error> {
    let (socket, _) = tokio_tungstenite::connect_async(url).await?;
    let (mut sink, mut stream) = socket.split();

    let mut connect = Frame::new(Command::Connect)
        .with_header("accept-version", "1.2")
        .with_header("host", options.host.as_str())
        .with_header("heart-beat", "0,0");
    if let Some(login) = &options.login {
        connect = connect.with_header("login", login.as_str());
    }
    if let Some(passcode) = &options.passcode {
        connect = connect.with_header("passcode", passcode.as_str());
    }
    sink.send(WsMessage::Text(connect.encode())).await?;

    while let Some(next) = stream.next().await {
        let text = match next? {
            WsMessage::Text(text) => text,
            WsMessage::Close(_) => break,
            _ => continue,
        };
        match Frame::parse(&text)? {
            Some(frame) if frame.command == Command::Connected => {
                tracing::info!(
                    url,
                    version = frame.header("version").unwrap_or("1.2"),
                    "connected to broker"
                );
                return Ok((sink, stream));
            }
            Some(frame) if frame.command == Command::Error => {
                return Err(Error::Refused {
                    message: frame
                        .header("message")
                        .map(str::to_string)
                        .unwrap_or(frame.body),
                });
            }
            _ => continue,
        }
    }
    Err(Error::Closed)
}

/// Deliver one inbound frame. Returns `false` when the session is over.
fn route(shared: &Shared, frame: Frame) -> bool {
    match frame.command {
        Command::Message => {
            let Some(id) = frame.header("subscription") else {
                tracing::warn!("MESSAGE frame without subscription header");
                return true;
            };
            let body = if frame.body.is_empty() {
                serde_json::Value::Null
            } else {
                match serde_json::from_str(&frame.body) {
                    Ok(body) => body,
                    Err(error) => {
                        tracing::warn!(%error, subscription = id, "undecodable message body");
                        return true;
                    }
                }
            };
            let message = Message {
                destination: frame.header("destination").unwrap_or_default().to_string(),
                reply_to: frame.header("reply-to").map(str::to_string),
                body,
            };
            let mut routes = shared.routes();
            if let Some((_, tx)) = routes.get(id) {
                if tx.send(message).is_err() {
                    routes.remove(id);
                }
            }
            true
        }
        Command::Error => {
            tracing::error!(
                reason = frame.header("message").unwrap_or_default(),
                body = %frame.body,
                "broker sent ERROR frame"
            );
            false
        }
        _ => true,
    }
}

impl Drop for StompBroker {
    fn drop(&mut self) {
        self.reader.abort();
        self.writer.abort();
        self.shared.disconnected();
    }
}

#[async_trait]
impl Broker for StompBroker {
    async fn subscribe(&self, destination: &str) -> Result<Subscription, Error> {
        if !*self.shared.connected.borrow() {
            return Err(Error::NotConnected);
        }
        let id = format!("sub-{}", self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();
        self.shared
            .routes()
            .insert(id.clone(), (destination.to_string(), tx));
        self.shared.send(
            Frame::new(Command::Subscribe)
                .with_header("id", id.as_str())
                .with_header("destination", destination)
                .with_header("ack", "auto"),
        )?;

        let release: Arc<dyn Unsubscribe> = self.shared.clone();
        Ok(Subscription::new(id, destination, rx, release))
    }

    async fn publish(&self, message: Message) -> Result<(), Error> {
        let mut frame = Frame::new(Command::Send)
            .with_header("destination", message.destination)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&message.body)?);
        if let Some(reply_to) = message.reply_to {
            frame = frame.with_header("reply-to", reply_to);
        }
        self.shared.send(frame)
    }

    fn connection(&self) -> watch::Receiver<bool> {
        self.shared.connected.subscribe()
    }
}
