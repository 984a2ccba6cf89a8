//! In-memory gateway for unit tests

use super::call::{ApiCall, Gateway};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays a fixed sequence of responses and records every call
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl ScriptedGateway {
    /// Gateway that answers with `responses` in order
    pub fn new(responses: impl IntoIterator<Item = Result<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Gateway that answers every call with a success body, in order
    pub fn pages(pages: impl IntoIterator<Item = Value>) -> Self {
        Self::new(pages.into_iter().map(Ok))
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn execute(&self, call: &ApiCall) -> Result<Value> {
        self.calls.lock().unwrap().push(call.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other(format!("unscripted call to {}", call.path()))))
    }
}
