use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{info, instrument};

use vitals_tracker_domain::entities::ReadingTrends;

use crate::api::routes::AppState;
use crate::entities::{CreateReadingRequest, ErrorResponse, HistoryQueryParams, ReadingResponse};

/// Reading history for a patient, newest first
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/readings",
    params(
        ("id" = String, Path, description = "Patient ID"),
        HistoryQueryParams
    ),
    responses(
        (status = 200, description = "Readings, newest first", body = [ReadingResponse]),
        (status = 400, description = "Malformed ID or query", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(state, query))]
pub async fn get_reading_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<HistoryQueryParams>, QueryRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Query(params) = query?;
    let readings = state.readings.history(&id, params.limit).await?;

    info!("Returning {} reading(s) for patient {}", readings.len(), id);
    let body: Vec<ReadingResponse> = readings.into_iter().map(ReadingResponse::from).collect();
    Ok(Json(body))
}

/// Record a reading for a patient
#[utoipa::path(
    post,
    path = "/api/v1/patients/{id}/readings",
    params(
        ("id" = String, Path, description = "Patient ID")
    ),
    request_body = CreateReadingRequest,
    responses(
        (status = 201, description = "Reading recorded", body = ReadingResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(state, payload))]
pub async fn create_reading(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateReadingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(request) = payload?;
    let reading = state.readings.record_reading(&id, request.into()).await?;

    info!("Reading created with ID: {}", reading.id);
    Ok((StatusCode::CREATED, Json(ReadingResponse::from(reading))))
}

/// Delete a single reading
#[utoipa::path(
    delete,
    path = "/api/v1/readings/{id}",
    params(
        ("id" = String, Path, description = "Reading ID")
    ),
    responses(
        (status = 204, description = "Reading deleted"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Reading not found", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(state))]
pub async fn delete_reading(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    state.readings.delete_reading(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Chart series over the patient's most recent readings, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/trends",
    params(
        ("id" = String, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Trend series", body = ReadingTrends),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(state))]
pub async fn get_trends(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let trends = state.readings.trends(&id).await?;
    Ok(Json(trends))
}

/// Download the patient's full history as CSV
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/export",
    params(
        ("id" = String, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(state))]
pub async fn export_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let export = state.readings.export_csv(&id).await?;

    let disposition = content_disposition(&export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    ))
}

/// `attachment` disposition with an ASCII `filename` and an RFC 5987 `filename*`
fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        urlencoding::encode(file_name)
    )
}
