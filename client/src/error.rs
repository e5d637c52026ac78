use serde::Serialize;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Machine-readable category of an [`NhlApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NhlApiErrorCode {
    ResourceNotFound,
    RateLimitExceeded,
    BadRequest,
    Unauthorized,
    ServerError,
    Unexpected,
    Http,
    Decode,
    InvalidArgument,
    WebSocket,
    MissingField,
}

impl NhlApiErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceNotFound => "resource_not_found",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::ServerError => "server_error",
            Self::Unexpected => "unexpected",
            Self::Http => "http",
            Self::Decode => "decode",
            Self::InvalidArgument => "invalid_argument",
            Self::WebSocket => "websocket",
            Self::MissingField => "missing_field",
        }
    }
}

impl std::fmt::Display for NhlApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum NhlApiError {
    #[error("{message}")]
    ResourceNotFound { message: String },

    #[error("{message}")]
    RateLimitExceeded { message: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    ServerError { message: String, status: u16 },

    #[error("Unexpected error: {message}")]
    Unexpected { message: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("WebSocket error: {0}")]
    WebSocket(Box<tungstenite::Error>),

    #[error("Missing field in response: {0}")]
    MissingField(&'static str),
}

impl From<tungstenite::Error> for NhlApiError {
    fn from(err: tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(err))
    }
}

impl NhlApiError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Map a non-success response to an error
    ///
    /// The message names the URL and, when the body is JSON with a `message`
    /// field, appends it.
    pub fn from_response(status: u16, url: &str, body: &str) -> Self {
        let mut message = format!("Request to {} failed", url);
        if let Some(detail) = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(|m| m.as_str())
        {
            message.push_str(": ");
            message.push_str(detail);
        }

        match status {
            404 => Self::ResourceNotFound { message },
            429 => Self::RateLimitExceeded { message },
            400 => Self::BadRequest { message },
            401 => Self::Unauthorized { message },
            500..=599 => Self::ServerError { message, status },
            _ => Self::Unexpected { message, status },
        }
    }

    /// HTTP status the error came from, when there was one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ResourceNotFound { .. } => Some(404),
            Self::RateLimitExceeded { .. } => Some(429),
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::ServerError { status, .. } | Self::Unexpected { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn error_code(&self) -> NhlApiErrorCode {
        match self {
            Self::ResourceNotFound { .. } => NhlApiErrorCode::ResourceNotFound,
            Self::RateLimitExceeded { .. } => NhlApiErrorCode::RateLimitExceeded,
            Self::BadRequest { .. } => NhlApiErrorCode::BadRequest,
            Self::Unauthorized { .. } => NhlApiErrorCode::Unauthorized,
            Self::ServerError { .. } => NhlApiErrorCode::ServerError,
            Self::Unexpected { .. } => NhlApiErrorCode::Unexpected,
            Self::Http(_) => NhlApiErrorCode::Http,
            Self::Decode(_) => NhlApiErrorCode::Decode,
            Self::InvalidArgument(_) => NhlApiErrorCode::InvalidArgument,
            Self::WebSocket(_) => NhlApiErrorCode::WebSocket,
            Self::MissingField(_) => NhlApiErrorCode::MissingField,
        }
    }
}

pub type Result<T> = std::result::Result<T, NhlApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://api-web.nhle.com/v1/roster/XXX/20232024";

    #[test]
    fn maps_known_statuses() {
        let cases = [
            (404, NhlApiErrorCode::ResourceNotFound),
            (429, NhlApiErrorCode::RateLimitExceeded),
            (400, NhlApiErrorCode::BadRequest),
            (401, NhlApiErrorCode::Unauthorized),
            (500, NhlApiErrorCode::ServerError),
            (503, NhlApiErrorCode::ServerError),
            (403, NhlApiErrorCode::Unexpected),
            (302, NhlApiErrorCode::Unexpected),
        ];
        for (status, code) in cases {
            let err = NhlApiError::from_response(status, URL, "");
            assert_eq!(err.error_code(), code, "status {}", status);
            assert_eq!(err.status_code(), Some(status));
        }
    }

    #[test]
    fn message_without_body_detail() {
        let err = NhlApiError::from_response(404, URL, "<html>not found</html>");
        assert_eq!(err.to_string(), format!("Request to {} failed", URL));
    }

    #[test]
    fn message_includes_json_detail() {
        let err = NhlApiError::from_response(400, URL, r#"{"message": "bad season"}"#);
        assert_eq!(
            err.to_string(),
            format!("Request to {} failed: bad season", URL)
        );
    }

    #[test]
    fn unexpected_is_prefixed() {
        let err = NhlApiError::from_response(418, URL, "{}");
        assert_eq!(
            err.to_string(),
            format!("Unexpected error: Request to {} failed", URL)
        );
    }

    #[test]
    fn non_http_errors_have_no_status() {
        let err = NhlApiError::invalid_argument("bad date");
        assert_eq!(err.status_code(), None);
        assert_eq!(err.error_code().as_str(), "invalid_argument");
        assert_eq!(err.to_string(), "Invalid argument: bad date");

        let err = NhlApiError::MissingField("standings");
        assert_eq!(err.to_string(), "Missing field in response: standings");
    }
}
