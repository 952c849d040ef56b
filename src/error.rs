use thiserror::Error;

/// Errors returned by the search client.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The mode tag does not name a known endpoint.
    #[error("Unknown mode: {0}")]
    InvalidMode(String),

    #[error("Query cannot be empty")]
    EmptyQuery,

    /// Network failure, timeout, or a non-success HTTP status.
    #[error("{}", request_failed_message(.status, .message))]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },

    /// The upstream body was not valid JSON or did not have the expected shape.
    #[error("Failed to decode upstream response: {0}")]
    DecodeError(String),
}

fn request_failed_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Upstream request failed with status {code}: {message}"),
        None => format!("Upstream request failed: {message}"),
    }
}

impl SearchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        SearchError::RequestFailed {
            status: err.status().map(|s| s.as_u16()),
            message,
        }
    }
}
