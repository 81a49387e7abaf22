
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use vitals_tracker_domain::health::HealthServiceTrait;
use vitals_tracker_domain::testing::{in_memory_services, MockHealthService, ServicePair};

use crate::api::routes::{create_router, AppState};

pub(super) struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }
}

pub(super) fn state_with(services: ServicePair, health: Arc<dyn HealthServiceTrait>) -> AppState {
    AppState {
        patients: services.patients,
        readings: services.readings,
        health,
    }
}

/// Router over fresh in-memory storage and a healthy mock health service
pub(super) fn test_app() -> Router {
    create_router(state_with(in_memory_services(), Arc::new(MockHealthService::new())))
}

pub(super) async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        text: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Register a patient and return its ID
pub(super) async fn create_patient(app: &Router, name: &str) -> String {
    let response = send(
        app,
        Method::POST,
        "/api/v1/patients",
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
    response.json()["id"].as_str().unwrap().to_string()
}
