//! Configuration transactions bound to one session.
//!
//! Changes are staged against the session's candidate configuration with
//! [`set`](ConfigSession::set) and [`delete`](ConfigSession::delete), then
//! applied with [`commit`](ConfigSession::commit).
//!
//! # Example
//!
//! ```rust,no_run
//! use vyrest::ClientBuilder;
//!
//! # async fn example() -> Result<(), vyrest::Error> {
//! let client = ClientBuilder::new("192.168.1.1")
//!     .username("vyatta")
//!     .password("vyatta")
//!     .build()?;
//!
//! let session = client.sessions().create_session().await?;
//! session.set(&["system", "host-name", "edge1"]).await?;
//! session.commit().await?;
//! session.save().await?;
//! session.teardown().await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;

use crate::client::model::{ConfigNode, Session};
use crate::client::{CONF_ROOT, Client};
use crate::error::Result;
use crate::transport::{Method, Transport, encode_path, encode_segment};

/// Handle to a configuration session on the device.
///
/// Holds `&Client`, so several sessions can be used side by side. The
/// session itself lives on the server; dropping the handle does not end it.
pub struct ConfigSession<'a, T> {
    client: &'a Client<T>,
    info: Session,
}

impl<T> fmt::Debug for ConfigSession<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigSession")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl<'a, T: Transport> ConfigSession<'a, T> {
    pub(crate) fn new(client: &'a Client<T>, info: Session) -> Self {
        Self { client, info }
    }

    /// The session id.
    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// The session record as listed when the handle was resolved.
    pub fn info(&self) -> &Session {
        &self.info
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/{}{}", CONF_ROOT, encode_segment(&self.info.id), suffix)
    }

    /// Stage creation of `path` in the candidate configuration.
    pub async fn set<S: AsRef<str>>(&self, path: &[S]) -> Result<()> {
        let url = self.url(&format!("/set{}", encode_path(path)));
        self.client.request(Method::PUT, &url).await?;
        Ok(())
    }

    /// Stage deletion of `path` from the candidate configuration.
    pub async fn delete<S: AsRef<str>>(&self, path: &[S]) -> Result<()> {
        let url = self.url(&format!("/delete{}", encode_path(path)));
        self.client.request(Method::PUT, &url).await?;
        Ok(())
    }

    /// Fetch the node at `path` with its immediate children.
    pub async fn get<S: AsRef<str>>(&self, path: &[S]) -> Result<ConfigNode> {
        self.client.get_json(&self.url(&encode_path(path))).await
    }

    /// Commit the candidate configuration.
    pub async fn commit(&self) -> Result<String> {
        self.action("commit").await
    }

    /// Save the running configuration as the boot configuration.
    pub async fn save(&self) -> Result<String> {
        self.action("save").await
    }

    /// Load the boot configuration into the candidate.
    pub async fn load(&self) -> Result<String> {
        self.action("load").await
    }

    /// Discard uncommitted changes.
    pub async fn discard(&self) -> Result<String> {
        self.action("discard").await
    }

    /// The full candidate configuration as text.
    pub async fn show(&self) -> Result<String> {
        self.action("show").await
    }

    /// Tear down the session on the device.
    ///
    /// Consumes the handle, it cannot be used after this.
    pub async fn teardown(self) -> Result<()> {
        self.client.sessions().teardown_session(&self.info.id).await
    }

    async fn action(&self, action: &str) -> Result<String> {
        self.client
            .message_request(Method::POST, &self.url(&format!("/{}", action)))
            .await
    }
}
