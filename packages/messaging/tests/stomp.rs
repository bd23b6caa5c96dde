use std::collections::HashMap;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use comicdesk_messaging::{
    request, Broker, Command, ConnectOptions, Error, Frame, Message, StompBroker,
};

const PUSH_TOPIC: &str = "/topic/last-read-list.update";

/// A single-connection STOMP server that echoes `/app/echo`, answers
/// `/app/fail` with an ERROR frame and pushes one message to any
/// subscription on [`PUSH_TOPIC`]. Every inbound frame is forwarded to
/// `seen`.
async fn start_server(refuse: bool) -> (String, mpsc::UnboundedReceiver<Frame>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let (seen, frames) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let socket = tokio_tungstenite::accept_async(tcp).await.unwrap();
        let (mut sink, mut stream) = socket.split();
        let mut subscriptions: HashMap<String, String> = HashMap::new();

        while let Some(Ok(WsMessage::Text(text))) = stream.next().await {
            let Some(frame) = Frame::parse(&text).unwrap() else {
                continue;
            };
            let _ = seen.send(frame.clone());

            let reply = match frame.command {
                Command::Connect if refuse => Some(
                    Frame::new(Command::Error)
                        .with_header("message", "bad credentials")
                        .with_body("login rejected"),
                ),
                Command::Connect => Some(Frame::new(Command::Connected).with_header("version", "1.2")),
                Command::Subscribe => {
                    let id = frame.header("id").unwrap().to_string();
                    let destination = frame.header("destination").unwrap().to_string();
                    subscriptions.insert(destination.clone(), id.clone());
                    (destination == PUSH_TOPIC).then(|| {
                        Frame::new(Command::Message)
                            .with_header("subscription", id)
                            .with_header("destination", destination)
                            .with_header("message-id", "1")
                            .with_body(r#"{"pushed":true}"#)
                    })
                }
                Command::Send if frame.header("destination") == Some("/app/echo") => {
                    let reply_to = frame.header("reply-to").unwrap();
                    subscriptions.get(reply_to).map(|id| {
                        Frame::new(Command::Message)
                            .with_header("subscription", id.as_str())
                            .with_header("destination", reply_to)
                            .with_header("message-id", "2")
                            .with_body(frame.body.clone())
                    })
                }
                Command::Send if frame.header("destination") == Some("/app/fail") => Some(
                    Frame::new(Command::Error)
                        .with_header("message", "boom"),
                ),
                _ => None,
            };

            if let Some(reply) = reply {
                let fatal = reply.command == Command::Error;
                sink.send(WsMessage::Text(reply.encode())).await.unwrap();
                if fatal {
                    break;
                }
            }
        }
    });

    (url, frames)
}

async fn next_command(frames: &mut mpsc::UnboundedReceiver<Frame>, command: Command) -> Frame {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let frame = frames.recv().await.unwrap();
            if frame.command == command {
                return frame;
            }
        }
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_handshake_and_pushed_message() {
    let (url, mut frames) = start_server(false).await;
    let broker = StompBroker::connect(&url).await.unwrap();
    assert!(broker.is_connected());

    let connect = next_command(&mut frames, Command::Connect).await;
    assert_eq!(connect.header("accept-version"), Some("1.2"));

    let mut subscription = broker.subscribe(PUSH_TOPIC).await.unwrap();
    let message = subscription.next().await.unwrap();
    assert_eq!(message.destination, PUSH_TOPIC);
    assert_eq!(message.body, json!({"pushed": true}));
}

#[tokio::test]
async fn test_request_reply_round_trip() {
    let (url, mut frames) = start_server(false).await;
    let broker = StompBroker::connect(&url).await.unwrap();

    let reply = request(&broker, "/app/echo", json!({"n": 5}), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(reply.body, json!({"n": 5}));

    let send = next_command(&mut frames, Command::Send).await;
    assert!(send.header("reply-to").unwrap().starts_with("/topic/reply."));

    // The reply topic is released afterwards.
    let unsubscribe = next_command(&mut frames, Command::Unsubscribe).await;
    assert!(unsubscribe.header("id").is_some());
}

#[tokio::test]
async fn test_error_frame_ends_session() {
    let (url, _frames) = start_server(false).await;
    let broker = StompBroker::connect(&url).await.unwrap();
    let mut connection = broker.connection();
    let mut subscription = broker.subscribe("/topic/anything").await.unwrap();

    broker
        .publish(Message::new("/app/fail", json!(null)))
        .await
        .unwrap();

    assert!(subscription.next().await.is_none());
    tokio::time::timeout(Duration::from_secs(5), connection.wait_for(|up| !*up))
        .await
        .unwrap()
        .unwrap();

    let err = broker.subscribe("/topic/anything").await.unwrap_err();
    assert!(matches!(err, Error::NotConnected));
}

#[tokio::test]
async fn test_refused_handshake() {
    let (url, _frames) = start_server(true).await;
    let options = ConnectOptions {
        login: Some("reader".to_string()),
        passcode: Some("wrong".to_string()),
        ..ConnectOptions::default()
    };
    let err = StompBroker::connect_with(&url, options).await.err().unwrap();
    match err {
        Error::Refused { message } => assert_eq!(message, "bad credentials"),
        other => panic!("unexpected error: {:?}", other),
    }
}
