//! Recording fake transport shared by the integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use domain_qdrant::{ApiRequest, Qdrant, QdrantError, QdrantResult, RawResponse, Transport};
use http::StatusCode;

/// Replays queued responses in order and keeps every request it was sent.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<RawResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: Vec<u8>) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.responses
            .lock()
            .unwrap()
            .push_back(RawResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> QdrantResult<RawResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| QdrantError::Transport("no response queued".to_string()))
    }
}

/// Client over a fresh recording transport, with request logging enabled.
pub fn client() -> (Qdrant, Arc<RecordingTransport>) {
    core_config::tracing::init_tracing(&core_config::Environment::Development);
    let transport = RecordingTransport::new();
    (Qdrant::new(transport.clone()), transport)
}
