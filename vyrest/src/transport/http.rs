//! HTTPS transport implementation using reqwest.

use log::{debug, trace};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, LOCATION};
use reqwest::{Client, Method};

use super::Transport;
use super::config::{CertificateVerification, RestConfig, SPECIFICATION_VERSION};
use super::response::RestResponse;
use crate::error::{Result, TransportError};

/// `Vyatta-Specification-Version`; header names are case-insensitive.
const SPECIFICATION_VERSION_HEADER: HeaderName =
    HeaderName::from_static("vyatta-specification-version");

/// HTTPS transport wrapping a reqwest client.
pub struct HttpTransport {
    /// The reqwest client carrying the default headers.
    client: Client,

    /// `https://host[:port]`, prefixed to every request path.
    base_url: String,

    /// Upper bound for a single request, including reading the body.
    timeout: std::time::Duration,
}

impl HttpTransport {
    /// Build the transport for the given configuration.
    ///
    /// No connection is made until the first request.
    pub fn new(config: &RestConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            SPECIFICATION_VERSION_HEADER,
            HeaderValue::from_static(SPECIFICATION_VERSION),
        );

        let mut auth = HeaderValue::from_str(&format!("Basic {}", config.basic_token()))
            .map_err(|_| TransportError::InvalidCredentials {
                user: config.username.clone(),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let accept_invalid =
            config.certificate_verification == CertificateVerification::AcceptInvalid;
        if accept_invalid {
            debug!(
                "certificate verification disabled for {}; peer identity is not checked",
                config.host
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(accept_invalid)
            .build()
            .map_err(TransportError::Build)?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            timeout: config.timeout,
        })
    }

    async fn send(&self, method: Method, url: &str) -> Result<RestResponse> {
        let response = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TransportError::ConnectionFailed {
                        url: url.to_string(),
                        source: e,
                    }
                } else {
                    TransportError::Http(e)
                }
            })?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await.map_err(TransportError::Http)?;

        Ok(RestResponse::new(status, location, body))
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, method: Method, path: &str) -> Result<RestResponse> {
        let url = format!("{}{}", self.base_url, path);
        trace!("{} {}", method, url);

        let response = tokio::time::timeout(self.timeout, self.send(method, &url))
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))??;

        trace!(
            "{} -> {} ({} bytes)",
            url,
            response.status,
            response.body.len()
        );
        Ok(response)
    }
}
