//! A programmable [`Transport`] for tests.
//!
//! Steps are consumed in order, one per request. Every request is recorded
//! so tests can assert on how many calls were made and what they carried.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::NetworkError;
use crate::request::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// One scripted reaction to a request.
#[derive(Debug, Clone)]
pub enum Step {
    /// Answer with this response.
    Respond(HttpResponse),
    /// Fail with this error.
    Fail(NetworkError),
    /// Wait, then perform the inner step.
    Delay(Duration, Box<Step>),
}

/// Transport that replays a queue of [`Step`]s.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    /// Creates a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a step.
    pub fn push(&self, step: Step) -> &Self {
        self.steps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(step);
        self
    }

    /// Queues a JSON response.
    pub fn push_json(&self, status: u16, value: serde_json::Value) -> &Self {
        self.push(Step::Respond(HttpResponse::json_body(status, &value)))
    }

    /// Queues a failure.
    pub fn push_error(&self, error: NetworkError) -> &Self {
        self.push(Step::Fail(error))
    }

    /// Queues a JSON response that arrives after `delay`.
    pub fn push_delayed_json(&self, delay: Duration, status: u16, value: serde_json::Value) -> &Self {
        self.push(Step::Delay(
            delay,
            Box::new(Step::Respond(HttpResponse::json_body(status, &value))),
        ))
    }

    /// Returns every request sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of requests sent so far.
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns the number of steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.steps.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let step = self
            .steps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        let mut step = step.ok_or_else(|| NetworkError::Connection("script exhausted".to_string()))?;
        loop {
            match step {
                Step::Respond(response) => return Ok(response),
                Step::Fail(error) => return Err(error),
                Step::Delay(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    step = *inner;
                }
            }
        }
    }
}
