use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use tracing::{instrument, warn};

use vitals_tracker_domain::entities::VitalSigns;

use crate::api::routes::AppState;
use crate::entities::{AssessmentResponse, ErrorResponse, ReadingResponse};

/// Classify the patient's most recent reading
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/assessment",
    params(
        ("id" = String, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Assessment of the latest reading", body = AssessmentResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Patient not found or no readings yet", body = ErrorResponse),
    ),
    tag = "assessments"
)]
#[instrument(skip(state))]
pub async fn assess_latest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let (reading, assessment) = state.readings.assess_latest(&id).await?;
    Ok(Json(AssessmentResponse::new(
        assessment,
        Some(ReadingResponse::from(reading)),
    )))
}

/// Classify a set of vital signs without storing them
#[utoipa::path(
    post,
    path = "/api/v1/assessments",
    request_body = VitalSigns,
    responses(
        (status = 200, description = "Assessment of the given vitals", body = AssessmentResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
    ),
    tag = "assessments"
)]
#[instrument(skip(state, payload))]
pub async fn assess_vitals(
    State(state): State<AppState>,
    payload: Result<Json<VitalSigns>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(vitals) = payload?;
    let assessment = state.readings.assess(&vitals);
    if assessment.is_urgent() {
        warn!("Ad-hoc assessment produced an urgent finding");
    }
    Ok(Json(AssessmentResponse::new(assessment, None)))
}
