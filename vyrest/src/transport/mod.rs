//! HTTP transport layer.
//!
//! This module provides request execution against the REST service:
//! authentication headers, timeouts, the raw response type and path
//! encoding. The [`Transport`] trait is the seam between the protocol
//! client and the wire.

pub mod config;
mod http;
#[cfg(test)]
pub(crate) mod mock;
mod path;
mod response;

use std::future::Future;

pub use config::{CertificateVerification, RestConfig, SPECIFICATION_VERSION};
pub use http::HttpTransport;
pub use path::{encode_path, encode_segment};
pub use reqwest::{Method, StatusCode};
pub use response::RestResponse;

use crate::error::Result;

/// Executes requests against the REST service.
///
/// Implementations return the raw response for every status code; mapping
/// error statuses to [`Error::Status`](crate::Error::Status) is done by the
/// client so that callers can special-case individual codes.
pub trait Transport: Send + Sync {
    /// Issue `method` against `path` (already encoded, starting with `/`).
    fn execute(
        &self,
        method: Method,
        path: &str,
    ) -> impl Future<Output = Result<RestResponse>> + Send;
}
