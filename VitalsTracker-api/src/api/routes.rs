use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::debug;

use vitals_tracker_domain::health::{HealthServiceTrait, StorageHealthService};
use vitals_tracker_domain::services::{
    create_patient_service, create_reading_service, PatientServiceTrait, ReadingServiceTrait,
};
use vitals_tracker_domain::StorageBackend;

use crate::api::handlers::{self, health};
use crate::openapi::configure_swagger_routes;

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub patients: Arc<dyn PatientServiceTrait>,
    pub readings: Arc<dyn ReadingServiceTrait>,
    pub health: Arc<dyn HealthServiceTrait>,
}

impl AppState {
    /// Wire the production services over one storage backend
    pub fn from_backend(backend: StorageBackend) -> Self {
        Self {
            patients: Arc::new(create_patient_service(backend.clone())),
            readings: Arc::new(create_reading_service(backend.clone())),
            health: Arc::new(StorageHealthService::new(backend)),
        }
    }
}

/// Build the router over the given services
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route(
            "/patients/:id",
            get(handlers::get_patient).delete(handlers::delete_patient),
        )
        .route(
            "/patients/:id/readings",
            get(handlers::get_reading_history).post(handlers::create_reading),
        )
        .route("/patients/:id/assessment", get(handlers::assess_latest))
        .route("/patients/:id/trends", get(handlers::get_trends))
        .route("/patients/:id/export", get(handlers::export_history))
        .route("/readings/:id", delete(handlers::delete_reading))
        .route("/assessments", post(handlers::assess_vitals));

    debug!("API routes configured");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .merge(configure_swagger_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Create the application router over the globally configured storage
pub fn create_app() -> Router {
    debug!("Creating application router");

    let state = AppState::from_backend(StorageBackend::from_global());
    health::initialize_server_start_time();

    create_router(state)
}
