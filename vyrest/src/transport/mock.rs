//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::{Method, StatusCode};

use super::Transport;
use super::response::RestResponse;
use crate::error::{Result, TransportError};

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub(crate) struct MockTransport {
    script: Mutex<VecDeque<Result<RestResponse>>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub(crate) fn reply(self, status: u16, body: &str) -> Self {
        self.push(Ok(RestResponse::new(
            StatusCode::from_u16(status).unwrap(),
            None,
            body.to_string(),
        )))
    }

    /// Queue a `201 Created` response carrying a Location header.
    pub(crate) fn created(self, location: &str) -> Self {
        self.push(Ok(RestResponse::new(
            StatusCode::CREATED,
            Some(location.to_string()),
            String::new(),
        )))
    }

    /// Queue a transport-level failure.
    pub(crate) fn timeout(self) -> Self {
        self.push(Err(
            TransportError::Timeout(Duration::from_secs(30)).into()
        ))
    }

    fn push(self, entry: Result<RestResponse>) -> Self {
        self.script.lock().unwrap().push_back(entry);
        self
    }

    /// Requests issued so far, formatted as `METHOD /path`.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of scripted responses not yet consumed.
    pub(crate) fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    async fn execute(&self, method: Method, path: &str) -> Result<RestResponse> {
        let request = format!("{} {}", method, path);
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {}", request))
    }
}
