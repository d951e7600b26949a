//! REST connection configuration.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};

/// Value sent in the `Vyatta-Specification-Version` header.
pub const SPECIFICATION_VERSION: &str = "0.1";

/// TLS certificate verification mode.
///
/// Devices usually serve a self-signed certificate, so verification is off
/// unless explicitly requested. With verification disabled the connection is
/// encrypted but the peer is not authenticated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CertificateVerification {
    /// Accept any certificate, including self-signed and expired ones.
    #[default]
    AcceptInvalid,

    /// Verify the peer certificate chain and hostname.
    Strict,
}

/// REST client configuration.
#[derive(Debug)]
pub struct RestConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    /// HTTPS port. `None` uses the scheme default.
    pub port: Option<u16>,

    /// Username for Basic authentication.
    pub username: String,

    /// Password for Basic authentication.
    pub password: SecretString,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Certificate verification mode.
    pub certificate_verification: CertificateVerification,

    /// Pause between output polls of an operational command.
    ///
    /// `None` re-polls immediately.
    pub poll_interval: Option<Duration>,
}

impl RestConfig {
    /// Base URL requests are issued against.
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("https://{}:{}", self.host, port),
            None => format!("https://{}", self.host),
        }
    }

    /// Basic authentication token, `base64(user:pass)`.
    pub(crate) fn basic_token(&self) -> String {
        STANDARD.encode(format!(
            "{}:{}",
            self.username,
            self.password.expose_secret()
        ))
    }
}
