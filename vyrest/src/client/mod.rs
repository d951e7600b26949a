//! Authenticated client for the REST service.
//!
//! [`Client`] owns the transport and the identity of the authenticated user.
//! Sessions, commands and the process registry borrow it, so several
//! sessions can be open on one client at the same time.

mod builder;
pub mod model;

pub use builder::ClientBuilder;

use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;

use crate::error::{DecodeError, Error, Result, StatusError};
use crate::op::{Command, ProcessRegistry};
use crate::session::SessionManager;
use crate::transport::{HttpTransport, Method, RestConfig, RestResponse, Transport, encode_path};
use model::{MessageErrorResponse, MessageResponse, OpNode};

pub(crate) const CONF_ROOT: &str = "/rest/conf";
pub(crate) const OP_ROOT: &str = "/rest/op";

/// Client for one device and one set of credentials.
pub struct Client<T = HttpTransport> {
    transport: T,

    /// Authenticated username, used for ownership filtering.
    username: String,

    /// Pause between output polls (`None` re-polls immediately).
    poll_interval: Option<Duration>,
}

impl Client<HttpTransport> {
    /// Create a client over HTTPS from an explicit configuration.
    pub fn new(config: RestConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            transport,
            username: config.username,
            poll_interval: config.poll_interval,
        })
    }

    /// Start building a client for `host`.
    pub fn builder(host: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(host)
    }
}

impl<T: Transport> Client<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(transport: T, username: impl Into<String>) -> Self {
        Self {
            transport,
            username: username.into(),
            poll_interval: None,
        }
    }

    /// Set the pause between output polls.
    pub fn set_poll_interval(&mut self, interval: Option<Duration>) {
        self.poll_interval = interval;
    }

    /// The authenticated username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn poll_interval(&self) -> Option<Duration> {
        self.poll_interval
    }

    /// Configuration session operations.
    pub fn sessions(&self) -> SessionManager<'_, T> {
        SessionManager::new(self)
    }

    /// Operational process operations.
    pub fn processes(&self) -> ProcessRegistry<'_, T> {
        ProcessRegistry::new(self)
    }

    /// Describe a node of the operational command tree.
    pub async fn get_operational<S: AsRef<str>>(&self, path: &[S]) -> Result<OpNode> {
        self.get_json(&format!("{}{}", OP_ROOT, encode_path(path)))
            .await
    }

    /// Start an operational command.
    ///
    /// Returns a handle bound to the job id the server allocated.
    pub async fn start_command<S: AsRef<str>>(&self, path: &[S]) -> Result<Command<'_, T>> {
        let pid = self
            .create(&format!("{}{}", OP_ROOT, encode_path(path)))
            .await?;
        debug!("started operational command {}", pid);
        Ok(Command::new(self, pid))
    }

    /// Execute a request and map statuses >= 400 to [`Error::Status`].
    ///
    /// The error displays as the status line; a server message in the body
    /// is kept on the error.
    pub(crate) async fn request(&self, method: Method, path: &str) -> Result<RestResponse> {
        let response = self.transport.execute(method, path).await?;
        if !response.is_success() {
            return Err(status_error(response).into());
        }
        Ok(response)
    }

    /// GET `path` and decode the JSON body.
    pub(crate) async fn get_json<D>(&self, path: &str) -> Result<D>
    where
        D: DeserializeOwned + Default,
    {
        let response = self.request(Method::GET, path).await?;
        decode(&response)
    }

    /// POST to a collection and return the id of the created resource.
    pub(crate) async fn create(&self, path: &str) -> Result<String> {
        let response = self.request(Method::POST, path).await?;
        response
            .resource_id()
            .map(str::to_owned)
            .ok_or_else(|| {
                DecodeError::MissingLocation {
                    method: Method::POST.to_string(),
                    path: path.to_string(),
                }
                .into()
            })
    }

    /// Issue a request whose body is `{message}` and return the message.
    ///
    /// On failure the server's message (or error field) becomes the error
    /// text, falling back to the status line.
    pub(crate) async fn message_request(&self, method: Method, path: &str) -> Result<String> {
        let response = self.transport.execute(method, path).await?;
        if !response.is_success() {
            return Err(status_error(response).display_message().into());
        }
        let body: MessageResponse = decode(&response)?;
        Ok(body.message)
    }
}

/// Status failure carrying the `{message|error}` text of a JSON error body.
///
/// A body that is not JSON leaves the message unset.
fn status_error(response: RestResponse) -> StatusError {
    let message = serde_json::from_slice::<MessageErrorResponse>(&response.body)
        .ok()
        .and_then(MessageErrorResponse::into_text);
    StatusError::new(response).with_message(message)
}

/// Decode a JSON body.
///
/// An empty body yields the default value rather than an error.
pub(crate) fn decode<D>(response: &RestResponse) -> Result<D>
where
    D: DeserializeOwned + Default,
{
    if response.is_blank() {
        return Ok(D::default());
    }
    serde_json::from_slice(&response.body).map_err(|e| Error::Decode(DecodeError::Json(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::transport::StatusCode;
    use crate::transport::mock::MockTransport;
    use model::{ConfigNode, Session};

    fn client(transport: MockTransport) -> Client<MockTransport> {
        Client::with_transport(transport, "vyatta")
    }

    #[test]
    fn test_decode_empty_body_is_default() {
        let response = RestResponse::new(StatusCode::OK, None, "");
        let node: ConfigNode = decode(&response).unwrap();
        assert_eq!(node, ConfigNode::default());

        let response = RestResponse::new(StatusCode::OK, None, "\n");
        let session: Session = decode(&response).unwrap();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_decode_malformed_body() {
        let response = RestResponse::new(StatusCode::OK, None, "<html>oops</html>");
        let err = decode::<ConfigNode>(&response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_request_maps_error_status() {
        let client = client(MockTransport::new().reply(403, "forbidden"));
        let err = client.request(Method::GET, "/rest/conf").await.unwrap_err();

        assert_eq!(err.to_string(), "403 Forbidden");
        match err {
            Error::Status(e) => {
                assert_eq!(e.response().text(), "forbidden");
                assert!(e.message().is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_request_keeps_server_error_field() {
        let client = client(MockTransport::new().reply(409, r#"{"error": "session locked"}"#));
        let err = client
            .request(Method::DELETE, "/rest/conf/S1")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "409 Conflict");
        match err {
            Error::Status(e) => assert_eq!(e.message(), Some("session locked")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_without_location() {
        let client = client(MockTransport::new().reply(201, ""));
        let err = client.create("/rest/conf").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Decode(DecodeError::MissingLocation { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_operational() {
        let client = client(MockTransport::new().reply(
            200,
            r#"{"children": ["bgp", "interfaces"], "action": "", "help": "Show system information"}"#,
        ));
        let node = client.get_operational(&["show"]).await.unwrap();

        assert_eq!(node.children, vec!["bgp", "interfaces"]);
        assert_eq!(node.help, "Show system information");
        assert_eq!(client.transport().requests(), vec!["GET /rest/op/show"]);
    }

    #[tokio::test]
    async fn test_start_command_binds_location_id() {
        let client = client(MockTransport::new().created("/rest/op/1234"));
        let command = client
            .start_command(&["show", "interfaces", "dataplane dp0s3"])
            .await
            .unwrap();

        assert_eq!(command.pid(), "1234");
        assert_eq!(
            client.transport().requests(),
            vec!["POST /rest/op/show/interfaces/dataplane%20dp0s3"]
        );
    }

    #[tokio::test]
    async fn test_message_request_decode_failure_on_success() {
        let client = client(MockTransport::new().reply(200, "not json"));
        let err = client
            .message_request(Method::POST, "/rest/conf/S1/commit")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_message_request_non_json_failure_uses_status() {
        let client = client(MockTransport::new().reply(500, "<html>boom</html>"));
        let err = client
            .message_request(Method::POST, "/rest/conf/S1/save")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let client = client(MockTransport::new().timeout());
        let err = client.request(Method::GET, "/rest/op").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
