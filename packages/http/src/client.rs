use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::Error;
use crate::executor::HttpExecutor;
use crate::template::{Params, UrlTemplate};
use crate::types::{HttpRequest, HttpResponse, Method};

/// JSON API client rooted at a base URL.
///
/// Paths are appended to the base URL's path, so a base of
/// `http://host/comicdesk` and a template of `/api/comics/{id}` produce
/// `http://host/comicdesk/api/comics/7`. Any non-2xx reply becomes
/// [`Error::Status`].
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    executor: Arc<dyn HttpExecutor>,
    default_headers: BTreeMap<String, String>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, executor: Arc<dyn HttpExecutor>) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            base_url,
            executor,
            default_headers: BTreeMap::from([(
                "Accept".to_string(),
                "application/json".to_string(),
            )]),
        })
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The absolute URL for `path`.
    pub fn resolve(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        let path = path.trim_start_matches('/');
        url.set_path(&format!("{}/{}", prefix, path));
        url
    }

    /// Send a request, resolving its path and applying default headers.
    pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, Error> {
        request.path = self.resolve(&request.path).to_string();
        for (name, value) in &self.default_headers {
            request
                .headers
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }

        tracing::debug!(method = %request.method, url = %request.path, "sending request");
        let response = self.executor.execute(&request).await?;
        tracing::debug!(
            method = %request.method,
            url = %request.path,
            status = response.status,
            "received response"
        );

        if response.is_success() {
            Ok(response)
        } else {
            Err(Error::Status {
                method: request.method.to_string(),
                url: request.path,
                status: response.status,
                message: status_message(&response),
            })
        }
    }

    /// Expand `template`, send, and decode the JSON reply.
    ///
    /// Decoding into `()` accepts an empty body.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        template: UrlTemplate,
        params: &Params,
        body: Option<serde_json::Value>,
    ) -> Result<T, Error> {
        let mut request = HttpRequest::new(method, template.expand(params)?);
        request.body = body;
        let response = self.send(request).await?;
        Ok(response.json()?)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        template: UrlTemplate,
        params: &Params,
    ) -> Result<T, Error> {
        self.call(Method::Get, template, params, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        template: UrlTemplate,
        params: &Params,
        body: &B,
    ) -> Result<T, Error> {
        let body = serde_json::to_value(body)?;
        self.call(Method::Post, template, params, Some(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        template: UrlTemplate,
        params: &Params,
        body: &B,
    ) -> Result<T, Error> {
        let body = serde_json::to_value(body)?;
        self.call(Method::Put, template, params, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        template: UrlTemplate,
        params: &Params,
    ) -> Result<T, Error> {
        self.call(Method::Delete, template, params, None).await
    }

    /// `DELETE` with a JSON body, for endpoints that identify targets in the body.
    pub async fn delete_with<B: Serialize, T: DeserializeOwned>(
        &self,
        template: UrlTemplate,
        params: &Params,
        body: &B,
    ) -> Result<T, Error> {
        let body = serde_json::to_value(body)?;
        self.call(Method::Delete, template, params, Some(body)).await
    }
}

fn status_message(response: &HttpResponse) -> String {
    if let Some(message) = response.body.get("message").and_then(|m| m.as_str()) {
        return message.to_string();
    }
    if !response.body_text.is_empty() {
        return response.body_text.clone();
    }
    http::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::mock::MockExecutor;
    use collection_literals::btree;
    use serde::Deserialize;
    use serde_json::json;

    const COMIC: UrlTemplate = UrlTemplate::new("/api/comics/{id}");

    #[derive(Debug, Deserialize, PartialEq)]
    struct Comic {
        id: u64,
        title: String,
    }

    fn client(executor: &MockExecutor) -> ApiClient {
        ApiClient::new("http://localhost:7171", Arc::new(executor.clone())).unwrap()
    }

    #[test]
    fn resolve_keeps_base_path_prefix() {
        let executor = MockExecutor::new();
        let client =
            ApiClient::new("http://host:80/comicdesk/", Arc::new(executor)).unwrap();
        assert_eq!(
            client.resolve("/api/comics/7").as_str(),
            "http://host/comicdesk/api/comics/7"
        );
    }

    #[tokio::test]
    async fn get_expands_template_and_decodes() {
        let executor = MockExecutor::new().with_response(
            Method::Get,
            "/api/comics/7",
            MockExecutor::success_response(json!({"id": 7, "title": "Saga"})),
        );
        let params: Params = btree! { "id" => "7".to_string() };

        let comic: Comic = client(&executor).get(COMIC, &params).await.unwrap();
        assert_eq!(
            comic,
            Comic {
                id: 7,
                title: "Saga".into()
            }
        );

        let recorded = executor.recorded_requests();
        assert_eq!(recorded[0].path, "http://localhost:7171/api/comics/7");
        assert_eq!(
            recorded[0].headers.get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn resolve_keeps_encoded_segments() {
        let client = client(&MockExecutor::new());
        let path = COMIC.expand(&btree! { "id" => "a/b?c".to_string() }).unwrap();
        assert_eq!(
            client.resolve(&path).as_str(),
            "http://localhost:7171/api/comics/a%2Fb%3Fc"
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let executor = MockExecutor::new();
        let params: Params = btree! { "id" => "404".to_string() };

        let err = client(&executor)
            .get::<Comic>(COMIC, &params)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("GET"));
    }

    #[tokio::test]
    async fn status_message_prefers_json_message() {
        let executor = MockExecutor::new().with_default_response(HttpResponse::with_status(
            400,
            r#"{"message":"hash is blocked"}"#,
        ));
        let params: Params = btree! { "id" => "1".to_string() };

        let err = client(&executor)
            .get::<Comic>(COMIC, &params)
            .await
            .unwrap_err();
        match err {
            Error::Status { message, .. } => assert_eq!(message, "hash is blocked"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_placeholder_never_sends() {
        let executor = MockExecutor::new();
        let err = client(&executor)
            .get::<Comic>(COMIC, &Params::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
        assert!(executor.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn post_sends_body_and_accepts_empty_reply() {
        const IMPORT: UrlTemplate = UrlTemplate::new("/api/comics/import");
        let executor = MockExecutor::new().with_response(
            Method::Post,
            "/api/comics/import",
            HttpResponse::with_status(200, ""),
        );

        let body = json!({"files": ["a.cbz"]});
        client(&executor)
            .post::<_, ()>(IMPORT, &Params::new(), &body)
            .await
            .unwrap();

        let recorded = executor.recorded_requests();
        assert_eq!(recorded[0].method, Method::Post);
        assert_eq!(recorded[0].body, Some(body));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let executor = MockExecutor::new().fail_with("connection refused");
        let params: Params = btree! { "id" => "1".to_string() };
        let err = client(&executor)
            .delete::<()>(COMIC, &params)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }

    #[test]
    fn with_header_adds_default_header() {
        let executor = MockExecutor::new();
        let client = client(&executor).with_header("X-Client", "cli");
        assert_eq!(
            client.default_headers.get("X-Client"),
            Some(&"cli".to_string())
        );
        assert!(format!("{:?}", client).contains("localhost"));
    }
}
