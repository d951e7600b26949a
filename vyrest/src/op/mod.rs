//! Operational commands.
//!
//! Operational commands run on the device outside the configuration tree.
//! They are not tied to a session: a job is started, its output is polled
//! until the server reports it exhausted, and it can be killed at any time.

mod command;
mod registry;
mod stream;

pub use command::Command;
pub use registry::ProcessRegistry;
pub use stream::OutputStream;
