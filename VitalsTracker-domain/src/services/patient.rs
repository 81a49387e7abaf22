use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

use vitals_tracker_data::repository::{
    PatientRepository, PatientRepositoryTrait, RepositoryError, StorageBackend,
};

use crate::entities::conversions;
use crate::entities::patient::{CreatePatientRequest, Patient};
use crate::services::validation::describe_validation_errors;

/// Patient service errors
#[derive(Debug, Error)]
pub enum PatientServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("Patient not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for PatientServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => PatientServiceError::NotFound(msg),
            other => PatientServiceError::RepositoryError(other.to_string()),
        }
    }
}

/// Trait for patient service operations
#[async_trait]
pub trait PatientServiceTrait: Send + Sync {
    /// Validate a create patient request
    fn validate_create_request(&self, request: &CreatePatientRequest) -> Result<(), PatientServiceError>;

    /// Register a new patient
    async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientServiceError>;

    /// All patients ordered by name
    async fn list_patients(&self) -> Result<Vec<Patient>, PatientServiceError>;

    /// A single patient by ID
    async fn get_patient(&self, id: &str) -> Result<Patient, PatientServiceError>;

    /// Delete a patient and its readings, returning how many readings were removed
    async fn delete_patient(&self, id: &str) -> Result<usize, PatientServiceError>;
}

/// Patient service for domain logic
pub struct PatientService<R: PatientRepositoryTrait> {
    repository: R,
}

impl<R: PatientRepositoryTrait> PatientService<R> {
    /// Create a new patient service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: PatientRepositoryTrait> PatientServiceTrait for PatientService<R> {
    fn validate_create_request(&self, request: &CreatePatientRequest) -> Result<(), PatientServiceError> {
        request.validate().map_err(|errors| {
            let message = describe_validation_errors(&errors);
            warn!("Rejected patient: {}", message);
            PatientServiceError::ValidationError(message)
        })
    }

    async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientServiceError> {
        let request = request.normalized();
        self.validate_create_request(&request)?;

        let record = self
            .repository
            .create(conversions::convert_to_data_create_patient(&request))
            .await?;

        info!("Registered patient {}", record.id);
        Ok(conversions::convert_to_domain_patient(record))
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, PatientServiceError> {
        let records = self.repository.get_all().await?;
        Ok(records
            .into_iter()
            .map(conversions::convert_to_domain_patient)
            .collect())
    }

    async fn get_patient(&self, id: &str) -> Result<Patient, PatientServiceError> {
        let id_uuid = conversions::parse_string_to_uuid(id).map_err(PatientServiceError::ValidationError)?;

        self.repository
            .get_by_id(id_uuid)
            .await?
            .map(conversions::convert_to_domain_patient)
            .ok_or_else(|| PatientServiceError::NotFound(format!("Patient with ID {} not found", id)))
    }

    async fn delete_patient(&self, id: &str) -> Result<usize, PatientServiceError> {
        let id_uuid = conversions::parse_string_to_uuid(id).map_err(PatientServiceError::ValidationError)?;

        let removed = self.repository.delete(id_uuid).await.map_err(|err| match err {
            RepositoryError::NotFound(_) => {
                PatientServiceError::NotFound(format!("Patient with ID {} not found", id))
            }
            other => other.into(),
        })?;

        info!("Deleted patient {} and {} reading(s)", id, removed);
        Ok(removed)
    }
}

/// Create a patient service over the given storage
pub fn create_patient_service(backend: StorageBackend) -> PatientService<PatientRepository> {
    PatientService::new(PatientRepository::new(backend))
}
