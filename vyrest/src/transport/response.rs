//! Raw response type returned by the transport.

use std::borrow::Cow;

use bytes::Bytes;
use reqwest::StatusCode;

/// Raw response from a REST request.
#[derive(Debug, Clone)]
pub struct RestResponse {
    /// HTTP status code.
    pub status: StatusCode,

    /// Value of the `Location` header, if any.
    pub location: Option<String>,

    /// Response body.
    pub body: Bytes,
}

impl RestResponse {
    /// Create a new response.
    pub fn new(status: StatusCode, location: Option<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            location,
            body: body.into(),
        }
    }

    /// Check if the status indicates success (below 400).
    pub fn is_success(&self) -> bool {
        self.status.as_u16() < 400
    }

    /// Whether the body is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// The body as text (lossy UTF-8 conversion).
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Id of the resource named by the `Location` header.
    ///
    /// This is the final path element of the location, ignoring trailing
    /// slashes. Returns `None` when the header is absent or has no element.
    pub fn resource_id(&self) -> Option<&str> {
        let location = self.location.as_deref()?.trim_end_matches('/');
        location.rsplit('/').next().filter(|id| !id.is_empty())
    }
}
