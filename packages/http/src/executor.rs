//! HTTP execution abstraction.
//!
//! The [`ApiClient`](crate::ApiClient) talks to an [`HttpExecutor`] rather
//! than to reqwest directly, so services can be exercised against
//! [`mock::MockExecutor`] without a network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::error::Error;
use crate::types::{HttpRequest, HttpResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends one request and returns whatever the server answered.
///
/// Non-2xx replies are not errors at this level; `Err` means no reply was
/// obtained at all.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Production executor backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_default_timeout() -> Result<Self, Error> {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            headers.insert(
                HeaderName::try_from(name.as_str())?,
                HeaderValue::try_from(value.as_str())?,
            );
        }

        let mut builder = self
            .client
            .request(request.method.into(), &request.path)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok(HttpResponse::with_status(status, text))
    }
}

/// Scripted executor for tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, PoisonError};

    use crate::types::Method;

    #[derive(Debug, Clone)]
    enum Failure {
        Transport(String),
        Panic(String),
    }

    #[derive(Debug, Default)]
    struct Script {
        responses: HashMap<(Method, String), HttpResponse>,
        default_response: Option<HttpResponse>,
        failure: Option<Failure>,
        delays: HashMap<String, Duration>,
        recorded: Vec<HttpRequest>,
    }

    /// Answers requests from a table keyed by method and path.
    ///
    /// Unmatched requests get the default response, or 404.
    #[derive(Clone, Default)]
    pub struct MockExecutor {
        script: Arc<Mutex<Script>>,
    }

    impl MockExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        fn script(&self) -> std::sync::MutexGuard<'_, Script> {
            self.script.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Answer `method path` with `response`.
        ///
        /// `path` is matched against the request path with any scheme, host
        /// and port removed.
        pub fn with_response(
            self,
            method: Method,
            path: impl Into<String>,
            response: HttpResponse,
        ) -> Self {
            self.script()
                .responses
                .insert((method, path.into()), response);
            self
        }

        pub fn with_default_response(self, response: HttpResponse) -> Self {
            self.script().default_response = Some(response);
            self
        }

        /// Hold requests to `path` for `delay` before answering.
        pub fn with_delay(self, path: impl Into<String>, delay: Duration) -> Self {
            self.script().delays.insert(path.into(), delay);
            self
        }

        /// Fail every request as if the connection was refused.
        pub fn fail_with(self, message: impl Into<String>) -> Self {
            self.script().failure = Some(Failure::Transport(message.into()));
            self
        }

        /// Panic inside `execute`, for exercising crash recovery.
        pub fn panic_with(self, message: impl Into<String>) -> Self {
            self.script().failure = Some(Failure::Panic(message.into()));
            self
        }

        pub fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.script().recorded.clone()
        }

        pub fn clear_recorded(&self) {
            self.script().recorded.clear();
        }

        pub fn success_response(body: serde_json::Value) -> HttpResponse {
            HttpResponse::ok(body)
        }

        pub fn error_response(status: u16, message: &str) -> HttpResponse {
            HttpResponse::with_status(status, message)
        }

        pub fn not_found() -> HttpResponse {
            Self::error_response(404, "Not Found")
        }
    }

    fn strip_origin(path: &str) -> &str {
        match path.find("://") {
            Some(scheme_end) => {
                let rest = &path[scheme_end + 3..];
                rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
            }
            None => path,
        }
    }

    #[async_trait]
    impl HttpExecutor for MockExecutor {
        async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
            let path = strip_origin(&request.path).to_string();

            let (delay, outcome) = {
                let mut script = self.script();
                script.recorded.push(request.clone());

                let delay = script.delays.get(&path).copied();
                let outcome = match script.failure.clone() {
                    Some(failure) => Err(failure),
                    None => Ok(script
                        .responses
                        .get(&(request.method, path))
                        .or(script.default_response.as_ref())
                        .cloned()
                        .unwrap_or_else(Self::not_found)),
                };
                (delay, outcome)
            };

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            match outcome {
                Ok(response) => Ok(response),
                Err(Failure::Transport(message)) => Err(Error::transport(message)),
                Err(Failure::Panic(message)) => panic!("{}", message),
            }
        }
    }
}
