use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{ApiRequest, RawResponse, Transport};
use crate::error::{ClientError, ClientResult};

/// Records every request and replays queued bodies in order.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<ClientResult<RawResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_json(&self, body: Value) {
        self.push_body(&body.to_string());
    }

    pub(crate) fn push_body(&self, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(RawResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }));
    }

    pub(crate) fn push_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ClientError::ConnectionFailure(message.to_string())));
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> ClientResult<RawResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::ConnectionFailure("no canned response".to_string())))
    }
}
