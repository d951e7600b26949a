//! Configuration session management.
//!
//! Sessions live on the device. The server is the only source of truth:
//! every lookup re-lists the sessions instead of caching them, since other
//! clients create and remove sessions independently.

mod config_session;

pub use config_session::ConfigSession;

use log::debug;

use crate::client::model::{Session, SessionListing};
use crate::client::{CONF_ROOT, Client};
use crate::error::{Error, ResourceKind, Result};
use crate::transport::{Method, Transport, encode_segment};

/// Create, enumerate and tear down configuration sessions.
pub struct SessionManager<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> SessionManager<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// Create a new session and return a handle bound to it.
    ///
    /// The create response only carries the id, so the session record is
    /// resolved from a fresh listing.
    pub async fn create_session(&self) -> Result<ConfigSession<'a, T>> {
        let id = self.client.create(CONF_ROOT).await?;
        debug!("created session {}", id);
        self.get_session(&id).await
    }

    /// List every session on the device.
    pub async fn list_sessions(&self) -> Result<Vec<Session>> {
        let listing: SessionListing = self.client.get_json(CONF_ROOT).await?;
        Ok(listing.sessions)
    }

    /// Resolve a session id to a handle.
    ///
    /// Fails with [`Error::NotFound`] if the id is not in the current listing.
    pub async fn get_session(&self, id: &str) -> Result<ConfigSession<'a, T>> {
        let info = self
            .list_sessions()
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::not_found(ResourceKind::Session, id))?;
        Ok(ConfigSession::new(self.client, info))
    }

    /// Check whether a session id is in the current listing.
    ///
    /// The answer can be stale by the time it is acted on.
    pub async fn session_exists(&self, id: &str) -> Result<bool> {
        Ok(self.list_sessions().await?.iter().any(|s| s.id == id))
    }

    /// Tear down one session.
    pub async fn teardown_session(&self, id: &str) -> Result<()> {
        debug!("tearing down session {}", id);
        self.client
            .request(
                Method::DELETE,
                &format!("{}/{}", CONF_ROOT, encode_segment(id)),
            )
            .await?;
        Ok(())
    }

    /// Tear down every session owned by the authenticated user.
    ///
    /// Sessions of other users are left alone. The first failure stops the
    /// sequence.
    pub async fn teardown_all_sessions(&self) -> Result<()> {
        let owned = self
            .list_sessions()
            .await?
            .into_iter()
            .filter(|s| s.username == self.client.username());

        for session in owned {
            self.teardown_session(&session.id).await?;
        }
        Ok(())
    }
}
