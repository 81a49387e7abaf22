use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Patient endpoints
        crate::api::handlers::patients::list_patients,
        crate::api::handlers::patients::create_patient,
        crate::api::handlers::patients::get_patient,
        crate::api::handlers::patients::delete_patient,

        // Reading endpoints
        crate::api::handlers::readings::get_reading_history,
        crate::api::handlers::readings::create_reading,
        crate::api::handlers::readings::delete_reading,
        crate::api::handlers::readings::get_trends,
        crate::api::handlers::readings::export_history,

        // Assessment endpoints
        crate::api::handlers::assessments::assess_latest,
        crate::api::handlers::assessments::assess_vitals
    ),
    components(
        schemas(
            // Entities
            crate::entities::common::ErrorResponse,
            crate::entities::patient::PatientResponse,
            crate::entities::patient::CreatePatientRequest,
            crate::entities::patient::DeletePatientResponse,
            crate::entities::reading::ReadingResponse,
            crate::entities::reading::CreateReadingRequest,
            crate::entities::reading::HistoryQueryParams,
            crate::entities::assessment::AssessmentResponse,

            // Domain types exposed directly
            vitals_tracker_domain::entities::VitalSigns,
            vitals_tracker_domain::entities::Finding,
            vitals_tracker_domain::entities::Severity,
            vitals_tracker_domain::entities::VitalSign,
            vitals_tracker_domain::entities::ReadingTrends,
            vitals_tracker_domain::entities::TrendPoint,
            vitals_tracker_domain::entities::BloodPressurePoint,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "patients", description = "Patient registration and removal"),
        (name = "readings", description = "Vital-sign readings, trends and export"),
        (name = "assessments", description = "Rule-based triage of vital signs")
    ),
    info(
        title = "Vitals Tracker API",
        version = "0.1.0",
        description = "API for recording patient vital signs and triaging them against clinical thresholds",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "Vitals Tracker API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        for name in ["health", "patients", "readings", "assessments"] {
            assert!(tags.iter().any(|tag| tag.name == name), "missing tag {}", name);
        }

        for path in [
            "/health",
            "/api/v1/patients",
            "/api/v1/patients/{id}",
            "/api/v1/patients/{id}/readings",
            "/api/v1/patients/{id}/assessment",
            "/api/v1/patients/{id}/trends",
            "/api/v1/patients/{id}/export",
            "/api/v1/readings/{id}",
            "/api/v1/assessments",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "missing path {}", path);
        }
    }
}
