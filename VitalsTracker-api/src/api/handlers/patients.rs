use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{info, instrument};

use crate::api::routes::AppState;
use crate::entities::{CreatePatientRequest, DeletePatientResponse, ErrorResponse, PatientResponse};

/// List all patients ordered by name
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    responses(
        (status = 200, description = "All patients", body = [PatientResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state))]
pub async fn list_patients(State(state): State<AppState>) -> Result<impl IntoResponse, ErrorResponse> {
    let patients = state.patients.list_patients().await?;
    let body: Vec<PatientResponse> = patients.into_iter().map(PatientResponse::from).collect();
    Ok(Json(body))
}

/// Register a new patient
#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = CreatePatientRequest,
    responses(
        (status = 201, description = "Patient created", body = PatientResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state, payload))]
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<CreatePatientRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(request) = payload?;
    let patient = state.patients.create_patient(request.into()).await?;

    info!("Patient created with ID: {}", patient.id);
    Ok((StatusCode::CREATED, Json(PatientResponse::from(patient))))
}

/// Get a single patient
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}",
    params(
        ("id" = String, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Patient found", body = PatientResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state))]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let patient = state.patients.get_patient(&id).await?;
    Ok(Json(PatientResponse::from(patient)))
}

/// Delete a patient together with all of its readings
#[utoipa::path(
    delete,
    path = "/api/v1/patients/{id}",
    params(
        ("id" = String, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Patient deleted", body = DeletePatientResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state))]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let readings_removed = state.patients.delete_patient(&id).await?;
    Ok(Json(DeletePatientResponse { id, readings_removed }))
}
