//! Discovery of running operational commands.

use log::debug;

use super::command::Command;
use crate::client::model::{Process, ProcessListing};
use crate::client::{Client, OP_ROOT};
use crate::error::{Error, ResourceKind, Result};
use crate::transport::Transport;

/// Enumerate, resolve and bulk-kill operational commands.
///
/// The process set changes constantly, so nothing is cached: every call
/// fetches a fresh listing.
pub struct ProcessRegistry<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> ProcessRegistry<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// List the processes currently known to the device.
    pub async fn list_processes(&self) -> Result<Vec<Process>> {
        let listing: ProcessListing = self.client.get_json(OP_ROOT).await?;
        Ok(listing.processes)
    }

    /// Find a process by id in the current listing.
    pub async fn get_process(&self, id: &str) -> Result<Process> {
        self.list_processes()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found(ResourceKind::Process, id))
    }

    /// Resolve a process id to a command handle.
    pub async fn get_command(&self, id: &str) -> Result<Command<'a, T>> {
        let process = self.get_process(id).await?;
        Ok(self.process_to_command(&process))
    }

    /// Command handle for a listed process.
    pub fn process_to_command(&self, process: &Process) -> Command<'a, T> {
        Command::new(self.client, process.id.as_str())
    }

    /// Kill every process owned by the authenticated user.
    ///
    /// The first failed kill stops the sequence and is returned.
    pub async fn kill_processes(&self) -> Result<()> {
        let owned: Vec<Process> = self
            .list_processes()
            .await?
            .into_iter()
            .filter(|p| p.username == self.client.username())
            .collect();
        debug!("killing {} processes", owned.len());

        for process in &owned {
            self.process_to_command(process).kill().await?;
        }
        Ok(())
    }
}
