use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::backend::{Backend, BackendError, BackendRequest, BackendResponse};

/// Canned backend that records every request it receives
pub struct MockBackend {
    status: u16,
    body: String,
    content_range: Option<String>,
    panic_message: Option<String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<BackendRequest>>,
}

impl MockBackend {
    /// 200 with a JSON body
    pub fn ok(body: Value) -> Self {
        Self::status(200, &body.to_string())
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_range: None,
            panic_message: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Panics inside `fetch`, for exercising the panic boundary
    pub fn panicking(message: &str) -> Self {
        let mut mock = Self::ok(Value::Null);
        mock.panic_message = Some(message.to_string());
        mock
    }

    pub fn with_content_range(mut self, header: &str) -> Self {
        self.content_range = Some(header.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<BackendRequest> {
        self.requests.lock().ok().and_then(|r| r.last().cloned())
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn fetch(&self, request: &BackendRequest) -> Result<BackendResponse, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if let Some(message) = &self.panic_message {
            panic!("{}", message);
        }
        Ok(BackendResponse {
            url: format!("http://mock.supabase/rest/v1/{}", request.table),
            status: self.status,
            content_range: self.content_range.clone(),
            body: self.body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = MockBackend::ok(json!([])).with_content_range("0-0/0");
        let request = BackendRequest { table: "units".to_string(), params: vec![("limit", "1".to_string())] };

        let response = mock.fetch(&request).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.content_range.as_deref(), Some("0-0/0"));
        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.last_request(), Some(request));
    }
}
