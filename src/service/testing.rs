//! In-memory transport double for service tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::sdk::transport::Transport;

/// Records every call and answers from per-action scripts.
///
/// Each action replays its scripted results in order; the last one is
/// repeated once the script runs dry. Unscripted actions answer `null`.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    calls: Mutex<Vec<(String, Option<Value>)>>,
    scripts: Mutex<HashMap<String, VecDeque<std::result::Result<Value, String>>>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result for `action`.
    pub(crate) fn respond(self, action: &str, value: Value) -> Self {
        self.push(action, Ok(value));
        self
    }

    /// Queue a remote failure for `action`.
    pub(crate) fn fail(self, action: &str, message: &str) -> Self {
        self.push(action, Err(message.to_string()));
        self
    }

    fn push(&self, action: &str, result: std::result::Result<Value, String>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(action.to_string())
            .or_default()
            .push_back(result);
    }

    /// Actions called so far, in order.
    pub(crate) fn actions(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(a, _)| a.clone()).collect()
    }

    /// Payload of the `n`th call to `action`.
    pub(crate) fn payload(&self, action: &str, n: usize) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(a, _)| a == action)
            .nth(n)
            .and_then(|(_, p)| p.clone())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn call(&self, action: &str, payload: Option<Value>) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((action.to_string(), payload));

        let mut scripts = self.scripts.lock().unwrap();
        let result = match scripts.get_mut(action) {
            Some(script) if script.len() > 1 => script.pop_front(),
            Some(script) => script.front().cloned(),
            None => None,
        };

        match result {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(Error::remote(1, message)),
            None => Ok(Value::Null),
        }
    }
}

/// Server details answer with the given status code.
pub(crate) fn details(server_id: i64, status: i64) -> Value {
    serde_json::json!({
        "ServerId": server_id,
        "Name": format!("server-{}", server_id),
        "ServerStatus": status
    })
}
