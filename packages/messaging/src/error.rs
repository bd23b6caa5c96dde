use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed frame: {message}")]
    Frame { message: String },

    #[error("Broker refused the connection: {message}")]
    Refused { message: String },

    #[error("Not connected to the broker")]
    NotConnected,

    #[error("No reply on {destination} within {after:?}")]
    Timeout {
        destination: String,
        after: Duration,
    },

    #[error("Subscription closed")]
    Closed,
}

impl Error {
    pub(crate) fn frame(message: impl Into<String>) -> Self {
        Error::Frame {
            message: message.into(),
        }
    }
}
