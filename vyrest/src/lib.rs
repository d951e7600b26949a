//! # vyrest
//!
//! Async client for the Vyatta configuration and operational REST service.
//!
//! vyrest opens editing sessions against the device's configuration tree,
//! stages and commits changes, and runs operational commands whose output
//! is retrieved by polling.
//!
//! ## Features
//!
//! - Explicit session handles, several sessions open at once
//! - Set/delete/get staging and commit/save/load/discard/show lifecycle
//! - Operational commands with buffered, streamed or chunk-by-chunk output
//! - Ownership-filtered bulk teardown of sessions and processes
//! - Tagged errors that keep the raw HTTP response
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vyrest::ClientBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vyrest::Error> {
//!     let client = ClientBuilder::new("192.168.1.1")
//!         .username("vyatta")
//!         .password("vyatta")
//!         .build()?;
//!
//!     let session = client.sessions().create_session().await?;
//!     session.set(&["system", "host-name", "edge1"]).await?;
//!     println!("{}", session.commit().await?);
//!     session.teardown().await?;
//!
//!     let command = client.start_command(&["show", "version"]).await?;
//!     println!("{}", command.output().await?);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod op;
pub mod session;
pub mod transport;

// Re-export main types for convenience
pub use client::model::{ConfigChild, ConfigNode, OpNode, Process, Session};
pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorKind, ResourceKind, Result};
pub use op::{Command, OutputStream, ProcessRegistry};
pub use session::{ConfigSession, SessionManager};
pub use transport::{CertificateVerification, HttpTransport, RestConfig, RestResponse, Transport};
