//! # comicdesk-http
//!
//! The HTTP boundary used by comicdesk services.
//!
//! - [`UrlTemplate`]: endpoint paths with `{name}` placeholders
//! - [`HttpExecutor`]: sends one [`HttpRequest`], returns one [`HttpResponse`]
//!   ([`ReqwestExecutor`] in production, `executor::mock::MockExecutor` under
//!   the `test-utils` feature)
//! - [`ApiClient`]: resolves paths against a base URL, turns non-2xx replies
//!   into [`Error::Status`] and decodes JSON bodies
//!
//! ```ignore
//! use std::sync::Arc;
//! use comicdesk_http::{ApiClient, Params, ReqwestExecutor, UrlTemplate};
//!
//! const COMIC: UrlTemplate = UrlTemplate::new("/api/comics/{id}");
//!
//! let client = ApiClient::new("http://localhost:7171", Arc::new(ReqwestExecutor::with_default_timeout()?))?;
//! let params: Params = [("id", "42".to_string())].into();
//! let comic: serde_json::Value = client.get(COMIC, &params).await?;
//! ```

pub mod client;
pub mod error;
pub mod executor;
pub mod template;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use executor::{HttpExecutor, ReqwestExecutor, DEFAULT_TIMEOUT};
pub use template::{Params, UrlTemplate};
pub use types::{HttpRequest, HttpResponse, Method};
