use comicdesk_store::EffectError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{method} {url} returned {status}: {message}")]
    Status {
        method: String,
        url: String,
        status: u16,
        message: String,
    },

    #[error("Invalid URL template `{template}`: {message}")]
    Template { template: String, message: String },

    #[error("Transport failure: {message}")]
    Transport { message: String },
}

impl Error {
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            message: message.into(),
        }
    }

    /// Status code of a non-2xx reply, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// A bad template is a bug in the caller, so it is not reported as a
// service failure.
impl From<Error> for EffectError {
    fn from(error: Error) -> Self {
        match error {
            Error::Template { .. } => EffectError::general(error.to_string()),
            other => EffectError::service(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_errors_are_general() {
        let error = Error::Template {
            template: "/api/{id}".into(),
            message: "no value for placeholder `id`".into(),
        };
        let effect_error = EffectError::from(error);
        assert!(!effect_error.is_service());
        assert!(effect_error.to_string().contains("/api/{id}"));
    }

    #[test]
    fn status_errors_are_service_failures() {
        let error = Error::Status {
            method: "GET".into(),
            url: "http://localhost/api/comics/1".into(),
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(error.status(), Some(404));
        assert!(EffectError::from(error).is_service());
    }

    #[test]
    fn transport_errors_are_service_failures() {
        let error = Error::transport("connection refused");
        assert_eq!(error.status(), None);
        let effect_error = EffectError::from(error);
        assert!(effect_error.is_service());
        assert!(effect_error.to_string().contains("connection refused"));
    }
}
