use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// HTTP verbs used by the library services.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// A single HTTP request descriptor.
///
/// `path` is either relative to the client's base URL or, once resolved by
/// the [`ApiClient`](crate::ApiClient), an absolute URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HttpRequest {
    #[serde(default)]
    pub method: Method,

    #[serde(default)]
    pub path: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// JSON request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: &impl Serialize) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// What came back from the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpResponse {
    pub status: u16,

    /// JSON body, or `Null` when the body was empty or not JSON
    pub body: serde_json::Value,

    /// Raw body text, kept for error messages
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body_text: String,
}

impl HttpResponse {
    /// A 2xx response with a JSON body.
    pub fn ok(body: serde_json::Value) -> Self {
        let body_text = if body.is_null() {
            String::new()
        } else {
            body.to_string()
        };
        Self {
            status: 200,
            body,
            body_text,
        }
    }

    /// A response with the given status and a plain text body.
    pub fn with_status(status: u16, text: impl Into<String>) -> Self {
        let body_text = text.into();
        let body = serde_json::from_str(&body_text).unwrap_or(serde_json::Value::Null);
        Self {
            status,
            body,
            body_text,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body. An empty body decodes as `null`, so `()` accepts it.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_converts_to_http_method() {
        assert_eq!(http::Method::from(Method::Get), http::Method::GET);
        assert_eq!(http::Method::from(Method::Delete), http::Method::DELETE);
        assert_eq!(Method::Put.to_string(), "PUT");
    }

    #[test]
    fn request_builders_set_method_and_body() {
        let request = HttpRequest::post("/api/comics/import")
            .with_body(&serde_json::json!({"filenames": ["a.cbz"]}))
            .unwrap()
            .with_header("Accept", "application/json");

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/api/comics/import");
        assert_eq!(
            request.body,
            Some(serde_json::json!({"filenames": ["a.cbz"]}))
        );
        assert_eq!(
            request.headers.get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        let response = HttpResponse::with_status(200, "");
        assert!(response.is_success());
        let unit: () = response.json().unwrap();
        assert_eq!(unit, ());
    }

    #[test]
    fn non_json_body_is_null_but_text_is_kept() {
        let response = HttpResponse::with_status(500, "Internal Server Error");
        assert!(!response.is_success());
        assert!(response.body.is_null());
        assert_eq!(response.body_text, "Internal Server Error");
    }

    #[test]
    fn ok_response_keeps_json_text() {
        let response = HttpResponse::ok(serde_json::json!({"id": 1}));
        assert_eq!(response.status, 200);
        assert_eq!(response.body_text, r#"{"id":1}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["id"], 1);
    }
}
