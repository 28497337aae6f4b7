use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cryptotap::{
    flow::FlowPolicy,
    models::{CheckoutMode, WidgetSettings},
    routes::router_with,
    services::{InMemoryRecorder, TransakEnvironment, TransakInitiator},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub recorder: InMemoryRecorder,
}

impl TestApp {
    pub fn new(mode: CheckoutMode, policy: FlowPolicy) -> Self {
        let recorder = InMemoryRecorder::new();
        let initiator = TransakInitiator::new(
            Some("test-key".to_string()),
            TransakEnvironment::Staging,
            WidgetSettings::default(),
        );
        let router = router_with(Arc::new(recorder.clone()), Arc::new(initiator), policy, mode);

        Self { router, recorder }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    /// Starts a session and returns its id.
    pub async fn start(&self, mode: Option<&str>) -> String {
        let body = match mode {
            Some(mode) => serde_json::json!({ "mode": mode }),
            None => serde_json::json!({}),
        };
        let (status, value) = self.request("POST", "/api/sessions", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        value["data"]["id"].as_str().unwrap().to_string()
    }

    pub async fn event(&self, id: &str, event: Value) -> (StatusCode, Value) {
        self.request("POST", &format!("/api/sessions/{}/events", id), Some(event)).await
    }

    /// Sends `event` and returns the new session view, failing on any error.
    pub async fn ok(&self, id: &str, event: Value) -> Value {
        let (status, value) = self.event(id, event).await;
        assert_eq!(status, StatusCode::OK, "unexpected response {}", value);
        value["data"].clone()
    }

    pub async fn key_in(&self, id: &str, keys: &str) -> Value {
        let mut view = Value::Null;
        for key in keys.chars() {
            view = self
                .ok(id, serde_json::json!({ "type": "press_key", "key": key.to_string() }))
                .await;
        }
        view
    }
}
