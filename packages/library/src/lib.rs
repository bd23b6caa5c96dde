//! # comicdesk-library
//!
//! Client-side state for the comic library server.
//!
//! Each feature module owns one slice of [`AppState`], its actions, the
//! reducer, the HTTP service and the effects that call it:
//!
//! - [`blocked_pages`]: page hashes hidden from every comic
//! - [`rest_audit_log`]: the server's request log, fetched incrementally
//! - [`comic_import`]: scanning a directory and importing selected files
//! - [`comic_book`]: the comic being viewed or edited
//! - [`reading_lists`]: user-curated lists of comics
//! - [`scraping`]: metadata search and scraping
//! - [`last_read`]: reading history, kept current by server push
//! - [`messaging`]: status of the push connection
//!
//! [`Library`] ties them to one store:
//!
//! ```ignore
//! use std::sync::Arc;
//! use comicdesk_library::{ClientConfig, Library};
//! use comicdesk_library::reading_lists::ReadingListsAction;
//! use comicdesk_store::TracingNotifier;
//!
//! let library = Library::connect(ClientConfig::from_env()?, Arc::new(TracingNotifier))?;
//! let result = library.run(ReadingListsAction::LoadLists).await?;
//! println!("{:?}", library.state().reading_lists.lists);
//! ```

pub mod blocked_pages;
pub mod comic_book;
pub mod comic_import;
pub mod config;
pub mod error;
pub mod last_read;
pub mod library;
pub mod messaging;
pub mod models;
pub mod reading_lists;
pub mod rest_audit_log;
pub mod scraping;
pub mod selectors;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::ClientConfig;
pub use error::Error;
pub use library::Library;
pub use state::{AppAction, AppState, AppStore};
