//! Error types for vyrest.

use std::fmt;
use std::io;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::transport::RestResponse;

/// Main error type for vyrest operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Network-level errors (connection, timeout, client setup)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with an error status
    #[error(transparent)]
    Status(#[from] StatusError),

    /// The response body or headers could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A session or process id was not present in the server's listing
    #[error("{kind} '{id}' not found")]
    NotFound { kind: ResourceKind, id: String },

    /// A required argument or configuration value is missing
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Writing command output to a sink failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// The taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::Status(_) => ErrorKind::Status,
            Error::Decode(_) => ErrorKind::Decode,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// The HTTP status, if this is a status failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status(e) => Some(e.status()),
            _ => None,
        }
    }

    pub(crate) fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Flat error classification for callers that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Status,
    Decode,
    NotFound,
    InvalidArgument,
    Io,
}

/// Kind of server-side resource a lookup was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Session,
    Process,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Session => f.write_str("Session"),
            ResourceKind::Process => f.write_str("Process"),
        }
    }
}

/// Transport layer errors (HTTP connection, timeouts).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {url}: {source}")]
    ConnectionFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request could not be sent or its body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Building the underlying HTTP client failed
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Credentials could not be placed in a header
    #[error("Invalid credentials for user '{user}'")]
    InvalidCredentials { user: String },

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

/// An HTTP status failure (status >= 400).
///
/// Keeps the raw response so callers can act on specific status codes.
/// Displays as the status line unless the failing call reports the server's
/// message instead (configuration lifecycle actions do).
#[derive(Debug)]
pub struct StatusError {
    message: Option<String>,
    display_message: bool,
    response: RestResponse,
}

impl StatusError {
    pub(crate) fn new(response: RestResponse) -> Self {
        Self {
            message: None,
            display_message: false,
            response,
        }
    }

    pub(crate) fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message.filter(|m| !m.is_empty());
        self
    }

    /// Display the server message, when there is one, instead of the status line.
    pub(crate) fn display_message(mut self) -> Self {
        self.display_message = true;
        self
    }

    /// The response status.
    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    /// Status line text, e.g. `404 Not Found`.
    pub fn status_text(&self) -> String {
        self.response.status.to_string()
    }

    /// Message supplied by the server in the error body, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The raw response that carried the failure.
    pub fn response(&self) -> &RestResponse {
        &self.response
    }

    /// Take ownership of the raw response.
    pub fn into_response(self) -> RestResponse {
        self.response
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) if self.display_message => f.write_str(message),
            _ => write!(f, "{}", self.response.status),
        }
    }
}

impl std::error::Error for StatusError {}

/// Response decoding errors.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Body was not valid JSON for the expected shape
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// A create request returned no usable Location header
    #[error("{method} {path} returned no resource location")]
    MissingLocation { method: String, path: String },
}

/// Result type alias using vyrest's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn response(status: u16, body: &'static str) -> RestResponse {
        RestResponse::new(
            StatusCode::from_u16(status).unwrap(),
            None,
            Bytes::from_static(body.as_bytes()),
        )
    }

    #[test]
    fn test_status_error_display_falls_back_to_status_text() {
        let err = Error::from(StatusError::new(response(404, "")));
        assert_eq!(err.to_string(), "404 Not Found");
        assert_eq!(err.kind(), ErrorKind::Status);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_status_error_display_prefers_message() {
        let err = StatusError::new(response(400, ""))
            .with_message(Some("Commit failed".into()))
            .display_message();
        assert_eq!(err.to_string(), "Commit failed");
        assert_eq!(err.status_text(), "400 Bad Request");
    }

    #[test]
    fn test_status_error_keeps_message_behind_status_text() {
        let err = StatusError::new(response(400, "")).with_message(Some("invalid value".into()));
        assert_eq!(err.to_string(), "400 Bad Request");
        assert_eq!(err.message(), Some("invalid value"));
    }

    #[test]
    fn test_empty_message_is_ignored() {
        let err = StatusError::new(response(500, ""))
            .with_message(Some(String::new()))
            .display_message();
        assert!(err.message().is_none());
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found(ResourceKind::Process, "42");
        assert_eq!(err.to_string(), "Process '42' not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
