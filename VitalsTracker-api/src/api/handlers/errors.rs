use axum::extract::rejection::{JsonRejection, QueryRejection};
use tracing::{error, info, warn};

use vitals_tracker_domain::services::{PatientServiceError, ReadingServiceError};

use crate::entities::ErrorResponse;

impl From<PatientServiceError> for ErrorResponse {
    fn from(err: PatientServiceError) -> Self {
        match err {
            PatientServiceError::ValidationError(msg) => {
                warn!("Invalid patient request: {}", msg);
                ErrorResponse::validation_error(msg, None)
            }
            PatientServiceError::NotFound(msg) => {
                info!("Patient lookup failed: {}", msg);
                ErrorResponse::not_found(msg)
            }
            PatientServiceError::RepositoryError(msg) => {
                error!("Patient storage failure: {}", msg);
                ErrorResponse::internal_error()
            }
        }
    }
}

impl From<ReadingServiceError> for ErrorResponse {
    fn from(err: ReadingServiceError) -> Self {
        match err {
            ReadingServiceError::ValidationError(msg) => {
                warn!("Invalid reading request: {}", msg);
                ErrorResponse::validation_error(msg, None)
            }
            ReadingServiceError::NotFound(msg) => {
                info!("Reading lookup failed: {}", msg);
                ErrorResponse::not_found(msg)
            }
            ReadingServiceError::RepositoryError(msg) => {
                error!("Reading storage failure: {}", msg);
                ErrorResponse::internal_error()
            }
        }
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        ErrorResponse::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        warn!("Rejected query string: {}", rejection.body_text());
        ErrorResponse::bad_request(rejection.body_text())
    }
}
