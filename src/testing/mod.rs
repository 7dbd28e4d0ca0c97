use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::Transport;
use crate::error::{ClientError, ClientResult};

/// Canned reply for one method/path pair
#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    NetworkDown,
    NotJson,
}

/// A request the code under test made
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Transport double that answers from a table and records every call.
///
/// Unscripted requests fail like an unreachable backend.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    replies: HashMap<(&'static str, String), Reply>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(mut self, path: &str, body: Value) -> Self {
        self.replies.insert(("GET", path.to_string()), Reply::Json(body));
        self
    }

    pub fn on_post(mut self, path: &str, body: Value) -> Self {
        self.replies.insert(("POST", path.to_string()), Reply::Json(body));
        self
    }

    pub fn fail_get(mut self, path: &str) -> Self {
        self.replies.insert(("GET", path.to_string()), Reply::NetworkDown);
        self
    }

    pub fn fail_post(mut self, path: &str) -> Self {
        self.replies.insert(("POST", path.to_string()), Reply::NetworkDown);
        self
    }

    /// Answer POSTs to `path` with a body that is not JSON
    pub fn garble_post(mut self, path: &str) -> Self {
        self.replies.insert(("POST", path.to_string()), Reply::NotJson);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, method: &str, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    fn answer(&self, call: RecordedCall) -> ClientResult<Value> {
        let key = (call.method, call.path.clone());
        self.calls.lock().unwrap().push(call);

        match self.replies.get(&key) {
            Some(Reply::Json(body)) => Ok(body.clone()),
            Some(Reply::NotJson) => Err(ClientError::invalid_json(format!("{} {}: expected value", key.0, key.1))),
            Some(Reply::NetworkDown) | None => {
                Err(ClientError::network(format!("{} {} unreachable", key.0, key.1)))
            }
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, path: &str, bearer: Option<&str>) -> ClientResult<Value> {
        self.answer(RecordedCall {
            method: "GET",
            path: path.to_string(),
            bearer: bearer.map(str::to_string),
            body: None,
        })
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> ClientResult<Value> {
        self.answer(RecordedCall {
            method: "POST",
            path: path.to_string(),
            bearer: None,
            body: body.cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn scripted_and_unscripted_replies() {
        let transport = RecordingTransport::new().on_get("/api/rooms", json!([]));

        assert_eq!(transport.get("/api/rooms", None).await.unwrap(), json!([]));
        let err = transport.post("/api/rooms", None).await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));

        assert_eq!(transport.call_count(), 2);
        assert_eq!(transport.calls_to("GET", "/api/rooms"), 1);
    }
}
