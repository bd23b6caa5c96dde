#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] comicdesk_http::Error),

    #[error("Messaging error: {0}")]
    Messaging(#[from] comicdesk_messaging::Error),

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("`{action}` does not call the server")]
    NotARequest { action: &'static str },

    #[error("Store stopped before a result arrived")]
    StoreClosed,
}
