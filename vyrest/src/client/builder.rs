//! Builder for creating REST clients.

use std::time::Duration;

use secrecy::SecretString;

use super::Client;
use crate::error::{Error, Result};
use crate::transport::{CertificateVerification, HttpTransport, RestConfig};

/// Builder for constructing a [`Client`].
///
/// # Example
///
/// ```rust,no_run
/// use vyrest::ClientBuilder;
///
/// # fn example() -> Result<(), vyrest::Error> {
/// let client = ClientBuilder::new("192.168.1.1")
///     .username("vyatta")
///     .password("vyatta")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    host: String,
    port: Option<u16>,
    username: Option<String>,
    password: Option<SecretString>,
    timeout: Duration,
    certificate_verification: CertificateVerification,
    poll_interval: Option<Duration>,
}

impl ClientBuilder {
    /// Create a new client builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
            certificate_verification: CertificateVerification::default(),
            poll_interval: None,
        }
    }

    /// Set the HTTPS port (default: 443).
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password for authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Set the per-request timeout (default: 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the certificate verification mode.
    pub fn certificate_verification(mut self, mode: CertificateVerification) -> Self {
        self.certificate_verification = mode;
        self
    }

    /// Pause between output polls of operational commands.
    ///
    /// By default the next poll is issued as soon as a chunk arrives.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Build the configuration without creating a client.
    pub fn into_config(self) -> Result<RestConfig> {
        if self.host.is_empty() {
            return Err(Error::invalid_argument("Host is required"));
        }
        let username = self
            .username
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::invalid_argument("Username is required"))?;

        Ok(RestConfig {
            host: self.host,
            port: self.port,
            username,
            password: self.password.unwrap_or_else(|| SecretString::from(String::new())),
            timeout: self.timeout,
            certificate_verification: self.certificate_verification,
            poll_interval: self.poll_interval,
        })
    }

    /// Build the client.
    ///
    /// No request is made; the first call on the client opens the connection.
    pub fn build(self) -> Result<Client<HttpTransport>> {
        Client::new(self.into_config()?)
    }
}
