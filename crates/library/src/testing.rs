//! Fake transports shared by the unit tests.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use tokio::sync::Notify;

use crate::error::TransportError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

pub(crate) fn json_response(status: u16, body: serde_json::Value) -> ApiResponse {
    ApiResponse::new(status, body.to_string())
}

pub(crate) fn message(status: u16, mensagem: &str) -> ApiResponse {
    json_response(status, serde_json::json!({ "mensagem": mensagem }))
}

pub(crate) fn erro(status: u16, erro: &str) -> ApiResponse {
    json_response(status, serde_json::json!({ "erro": erro }))
}

/// Records requests and answers them from a canned queue.
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub(crate) fn new(responses: Vec<Result<ApiResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(responses: Vec<ApiResponse>) -> Self {
        Self::new(responses.into_iter().map(Ok).collect())
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + Send + '_>> {
        self.requests.lock().unwrap().push(request);
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no mock response available".into())));
        Box::pin(async move { next })
    }
}

/// Holds every request in flight until [`GatedTransport::release`].
pub(crate) struct GatedTransport {
    inner: MockTransport,
    entered: Notify,
    gate: Notify,
}

impl GatedTransport {
    pub(crate) fn new(responses: Vec<Result<ApiResponse, TransportError>>) -> Self {
        Self {
            inner: MockTransport::new(responses),
            entered: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Resolves once a request has reached the transport.
    pub(crate) async fn wait_in_flight(&self) {
        self.entered.notified().await;
    }

    /// Lets the held request complete.
    pub(crate) fn release(&self) {
        self.gate.notify_one();
    }

    pub(crate) fn request_count(&self) -> usize {
        self.inner.request_count()
    }
}

impl Transport for GatedTransport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + Send + '_>> {
        Box::pin(async move {
            let response = self.inner.send(request).await;
            self.entered.notify_one();
            self.gate.notified().await;
            response
        })
    }
}
