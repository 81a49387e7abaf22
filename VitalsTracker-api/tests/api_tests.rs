use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use vitals_tracker_api::api::{create_router, AppState};
use vitals_tracker_data::database::{DatabaseConfig, DatabasePool};
use vitals_tracker_domain::StorageBackend;

async fn request(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
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
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn sqlite_app(name: &str) -> Router {
    let dir = std::env::temp_dir().join(format!("vitals-tracker-{}-{}", name, uuid::Uuid::new_v4()));
    let config = DatabaseConfig {
        sqlite_path: dir.join("vitals.db").to_string_lossy().to_string(),
        ..Default::default()
    };
    let pool = DatabasePool::open(&config).unwrap();
    create_router(AppState::from_backend(StorageBackend::sqlite(pool)))
}

#[tokio::test]
async fn test_health_reports_sqlite_as_ok() {
    let app = sqlite_app("health");
    let (status, body) = request(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_health_reports_memory_storage_as_degraded() {
    let app = create_router(AppState::from_backend(StorageBackend::in_memory()));
    let (status, body) = request(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_patient_lifecycle_against_sqlite() {
    let app = sqlite_app("lifecycle");

    let (status, patient) = request(
        &app,
        Method::POST,
        "/api/v1/patients",
        Some(json!({ "name": "Grace", "sex": "Female" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = patient["id"].as_str().unwrap().to_string();

    let readings_uri = format!("/api/v1/patients/{}/readings", id);
    let (status, _) = request(
        &app,
        Method::POST,
        &readings_uri,
        Some(json!({ "timestamp": "2024-06-01T07:30:00Z", "glucose_mg_dl": 320.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = request(
        &app,
        Method::POST,
        &readings_uri,
        Some(json!({ "timestamp": "2024-06-02T07:30:00Z", "spo2": 92.0, "temp_c": 38.4 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, assessment) =
        request(&app, Method::GET, &format!("/api/v1/patients/{}/assessment", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        assessment["assessments"],
        json!([
            "🌡️ FEVER: Rest and fluids recommended",
            "⚠️ BORDERLINE OXYGEN SATURATION: Monitor symptoms"
        ])
    );
    assert_eq!(assessment["lifestyle_tips"].as_array().unwrap().len(), 12);

    let (_, history) = request(&app, Method::GET, &readings_uri, None).await;
    assert_eq!(history.as_array().unwrap().len(), 2);
    assert_eq!(history[0]["spo2"], 92.0);

    let (status, deleted) = request(&app, Method::DELETE, &format!("/api/v1/patients/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["readings_removed"], 2);

    let (status, _) = request(&app, Method::GET, &readings_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
