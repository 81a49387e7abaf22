use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{CreatePatientRequest, PatientRecord};
use super::backend::StorageBackend;
use super::errors::RepositoryError;
use super::storage::DatabaseStorage;

/// Repository trait for patients
#[async_trait]
pub trait PatientRepositoryTrait: Send + Sync {
    /// Create a new patient from a request
    async fn create(&self, request: CreatePatientRequest) -> Result<PatientRecord, RepositoryError>;

    /// Get all patients ordered by name
    async fn get_all(&self) -> Result<Vec<PatientRecord>, RepositoryError>;

    /// Get a patient by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<PatientRecord>, RepositoryError>;

    /// Delete a patient together with its readings.
    /// Returns how many readings went with it.
    async fn delete(&self, id: Uuid) -> Result<usize, RepositoryError>;
}

/// Repository for patients
#[derive(Debug, Clone)]
pub struct PatientRepository {
    backend: StorageBackend,
}

impl PatientRepository {
    /// Create a repository over the given backend
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl PatientRepositoryTrait for PatientRepository {
    async fn create(&self, request: CreatePatientRequest) -> Result<PatientRecord, RepositoryError> {
        let patient = PatientRecord {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            dob: request.dob,
            sex: request.sex,
            notes: request.notes,
        };

        match &self.backend {
            StorageBackend::Sqlite(pool) => DatabaseStorage::insert_patient(pool, &patient)?,
            StorageBackend::Memory(storage) => storage.insert_patient(&patient)?,
        }

        info!("Patient created: id={}", patient.id);
        Ok(patient)
    }

    async fn get_all(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        debug!("Getting all patients");
        match &self.backend {
            StorageBackend::Sqlite(pool) => DatabaseStorage::list_patients(pool),
            StorageBackend::Memory(storage) => storage.list_patients(),
        }
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<PatientRecord>, RepositoryError> {
        let id = id.to_string();
        match &self.backend {
            StorageBackend::Sqlite(pool) => DatabaseStorage::get_patient(pool, &id),
            StorageBackend::Memory(storage) => storage.get_patient(&id),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<usize, RepositoryError> {
        let id = id.to_string();
        let removed = match &self.backend {
            StorageBackend::Sqlite(pool) => DatabaseStorage::delete_patient(pool, &id)?,
            StorageBackend::Memory(storage) => storage.delete_patient(&id)?,
        };

        info!("Patient deleted: id={}, readings removed={}", id, removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabasePool;

    fn backends() -> Vec<StorageBackend> {
        vec![
            StorageBackend::sqlite(DatabasePool::in_memory().unwrap()),
            StorageBackend::in_memory(),
        ]
    }

    fn request(name: &str) -> CreatePatientRequest {
        CreatePatientRequest {
            name: name.to_string(),
            dob: Some("1980-02-29".to_string()),
            sex: Some("Female".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_patient() {
        for backend in backends() {
            let repo = PatientRepository::new(backend);
            let created = repo.create(request("Ada")).await.unwrap();

            let id = Uuid::parse_str(&created.id).unwrap();
            let fetched = repo.get_by_id(id).await.unwrap().unwrap();
            assert_eq!(fetched, created);
            assert_eq!(fetched.dob.as_deref(), Some("1980-02-29"));
        }
    }

    #[tokio::test]
    async fn test_get_all_orders_by_name() {
        for backend in backends() {
            let repo = PatientRepository::new(backend);
            repo.create(request("Zoe")).await.unwrap();
            repo.create(request("Ada")).await.unwrap();
            repo.create(request("Mia")).await.unwrap();

            let names: Vec<String> = repo
                .get_all()
                .await
                .unwrap()
                .into_iter()
                .map(|p| p.name)
                .collect();
            assert_eq!(names, vec!["Ada", "Mia", "Zoe"]);
        }
    }

    #[tokio::test]
    async fn test_get_unknown_patient_is_none() {
        for backend in backends() {
            let repo = PatientRepository::new(backend);
            assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_delete_unknown_patient_is_not_found() {
        for backend in backends() {
            let repo = PatientRepository::new(backend);
            let result = repo.delete(Uuid::new_v4()).await;
            assert!(matches!(result, Err(RepositoryError::NotFound(_))));
        }
    }
}
