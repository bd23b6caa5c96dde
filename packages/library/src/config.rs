use std::time::Duration;

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:7171";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_IMPORT_MAXIMUM: usize = 1000;

pub const URL_VAR: &str = "COMICDESK_URL";
pub const WS_URL_VAR: &str = "COMICDESK_WS_URL";
pub const TIMEOUT_VAR: &str = "COMICDESK_TIMEOUT_SECS";
pub const IMPORT_MAXIMUM_VAR: &str = "COMICDESK_IMPORT_MAXIMUM";

/// Where the library server lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// STOMP endpoint; server push is disabled when unset.
    pub websocket_url: Option<String>,
    pub timeout: Duration,
    /// Upper bound on files listed by an import scan; larger requests are
    /// clamped.
    pub import_maximum: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            websocket_url: None,
            timeout: DEFAULT_TIMEOUT,
            import_maximum: DEFAULT_IMPORT_MAXIMUM,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_websocket_url(mut self, websocket_url: impl Into<String>) -> Self {
        self.websocket_url = Some(websocket_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_import_maximum(mut self, maximum: usize) -> Self {
        self.import_maximum = maximum;
        self
    }

    /// Defaults overridden by `COMICDESK_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();
        if let Some(url) = lookup(URL_VAR) {
            config.base_url = url;
        }
        if let Some(url) = lookup(WS_URL_VAR) {
            config.websocket_url = Some(url);
        }
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|_| Error::Config {
                message: format!(
                    "{} must be a whole number of seconds, got `{}`",
                    TIMEOUT_VAR, secs
                ),
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(maximum) = lookup(IMPORT_MAXIMUM_VAR) {
            config.import_maximum = maximum.trim().parse().map_err(|_| Error::Config {
                message: format!(
                    "{} must be a whole number of files, got `{}`",
                    IMPORT_MAXIMUM_VAR, maximum
                ),
            })?;
        }
        Ok(config)
    }
}
