use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{CreateReadingRequest, ReadingRecord};
use super::backend::StorageBackend;
use super::errors::RepositoryError;
use super::storage::DatabaseStorage;

/// Repository trait for vital-sign readings
#[async_trait]
pub trait ReadingRepositoryTrait: Send + Sync {
    /// Create a new reading. Fails with `NotFound` if the patient does not exist.
    async fn create(&self, request: CreateReadingRequest) -> Result<ReadingRecord, RepositoryError>;

    /// Readings for a patient, newest first, optionally capped
    async fn get_for_patient(
        &self,
        patient_id: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<ReadingRecord>, RepositoryError>;

    /// The newest reading for a patient
    async fn get_latest(&self, patient_id: Uuid) -> Result<Option<ReadingRecord>, RepositoryError>;

    /// Get a reading by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<ReadingRecord>, RepositoryError>;

    /// Delete a single reading. Fails with `NotFound` if it does not exist.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

/// Repository for vital-sign readings
#[derive(Debug, Clone)]
pub struct ReadingRepository {
    backend: StorageBackend,
}

impl ReadingRepository {
    /// Create a repository over the given backend
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ReadingRepositoryTrait for ReadingRepository {
    async fn create(&self, request: CreateReadingRequest) -> Result<ReadingRecord, RepositoryError> {
        let reading = ReadingRecord {
            id: Uuid::new_v4().to_string(),
            patient_id: request.patient_id,
            timestamp: request.timestamp,
            systolic: request.systolic,
            diastolic: request.diastolic,
            glucose_mg_dl: request.glucose_mg_dl,
            temp_c: request.temp_c,
            spo2: request.spo2,
            notes: request.notes,
        };

        match &self.backend {
            StorageBackend::Sqlite(pool) => DatabaseStorage::insert_reading(pool, &reading)?,
            StorageBackend::Memory(storage) => storage.insert_reading(&reading)?,
        }

        info!("Reading created: id={}, patient_id={}", reading.id, reading.patient_id);
        Ok(reading)
    }

    async fn get_for_patient(
        &self,
        patient_id: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<ReadingRecord>, RepositoryError> {
        debug!("Getting readings for patient {}", patient_id);
        let patient_id = patient_id.to_string();
        match &self.backend {
            StorageBackend::Sqlite(pool) => DatabaseStorage::readings_for_patient(pool, &patient_id, limit),
            StorageBackend::Memory(storage) => storage.readings_for_patient(&patient_id, limit),
        }
    }

    async fn get_latest(&self, patient_id: Uuid) -> Result<Option<ReadingRecord>, RepositoryError> {
        let latest = self.get_for_patient(patient_id, Some(1)).await?;
        Ok(latest.into_iter().next())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ReadingRecord>, RepositoryError> {
        let id = id.to_string();
        match &self.backend {
            StorageBackend::Sqlite(pool) => DatabaseStorage::get_reading(pool, &id),
            StorageBackend::Memory(storage) => storage.get_reading(&id),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let id = id.to_string();
        let removed = match &self.backend {
            StorageBackend::Sqlite(pool) => DatabaseStorage::delete_reading(pool, &id)?,
            StorageBackend::Memory(storage) => storage.delete_reading(&id)?,
        };

        if !removed {
            return Err(RepositoryError::NotFound(format!("reading {}", id)));
        }

        info!("Reading deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabasePool;
    use crate::models::CreatePatientRequest;
    use crate::repository::{PatientRepository, PatientRepositoryTrait};

    fn backends() -> Vec<StorageBackend> {
        vec![
            StorageBackend::sqlite(DatabasePool::in_memory().unwrap()),
            StorageBackend::in_memory(),
        ]
    }

    async fn add_patient(backend: &StorageBackend, name: &str) -> Uuid {
        let patients = PatientRepository::new(backend.clone());
        let patient = patients
            .create(CreatePatientRequest {
                name: name.to_string(),
                dob: None,
                sex: None,
                notes: None,
            })
            .await
            .unwrap();
        Uuid::parse_str(&patient.id).unwrap()
    }

    fn reading_at(patient_id: Uuid, timestamp: &str, systolic: i32) -> CreateReadingRequest {
        CreateReadingRequest {
            patient_id: patient_id.to_string(),
            timestamp: timestamp.to_string(),
            systolic: Some(systolic),
            diastolic: Some(80),
            glucose_mg_dl: None,
            temp_c: Some(36.6),
            spo2: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_reading_round_trips_optional_fields() {
        for backend in backends() {
            let patient_id = add_patient(&backend, "Ada").await;
            let repo = ReadingRepository::new(backend);

            let created = repo
                .create(reading_at(patient_id, "2024-03-01T08:00:00Z", 120))
                .await
                .unwrap();
            let fetched = repo
                .get_by_id(Uuid::parse_str(&created.id).unwrap())
                .await
                .unwrap()
                .unwrap();

            assert_eq!(fetched, created);
            assert_eq!(fetched.glucose_mg_dl, None);
            assert_eq!(fetched.temp_c, Some(36.6));
        }
    }

    #[tokio::test]
    async fn test_create_reading_for_unknown_patient_fails() {
        for backend in backends() {
            let repo = ReadingRepository::new(backend);
            let result = repo
                .create(reading_at(Uuid::new_v4(), "2024-03-01T08:00:00Z", 120))
                .await;
            assert!(matches!(result, Err(RepositoryError::NotFound(_))));
        }
    }

    #[tokio::test]
    async fn test_history_is_newest_first_and_scoped_to_patient() {
        for backend in backends() {
            let ada = add_patient(&backend, "Ada").await;
            let bob = add_patient(&backend, "Bob").await;
            let repo = ReadingRepository::new(backend);

            repo.create(reading_at(ada, "2024-03-02T08:00:00Z", 130)).await.unwrap();
            repo.create(reading_at(ada, "2024-03-01T08:00:00Z", 120)).await.unwrap();
            repo.create(reading_at(ada, "2024-03-03T08:00:00Z", 140)).await.unwrap();
            repo.create(reading_at(bob, "2024-03-04T08:00:00Z", 150)).await.unwrap();

            let history = repo.get_for_patient(ada, None).await.unwrap();
            let systolics: Vec<Option<i32>> = history.iter().map(|r| r.systolic).collect();
            assert_eq!(systolics, vec![Some(140), Some(130), Some(120)]);

            let limited = repo.get_for_patient(ada, Some(2)).await.unwrap();
            assert_eq!(limited.len(), 2);

            let latest = repo.get_latest(ada).await.unwrap().unwrap();
            assert_eq!(latest.systolic, Some(140));
        }
    }

    #[tokio::test]
    async fn test_equal_timestamps_prefer_latest_insert() {
        for backend in backends() {
            let ada = add_patient(&backend, "Ada").await;
            let repo = ReadingRepository::new(backend);

            repo.create(reading_at(ada, "2024-03-01T08:00:00Z", 120)).await.unwrap();
            repo.create(reading_at(ada, "2024-03-01T08:00:00Z", 125)).await.unwrap();

            let latest = repo.get_latest(ada).await.unwrap().unwrap();
            assert_eq!(latest.systolic, Some(125));
        }
    }

    #[tokio::test]
    async fn test_latest_is_none_without_readings() {
        for backend in backends() {
            let ada = add_patient(&backend, "Ada").await;
            let repo = ReadingRepository::new(backend);
            assert!(repo.get_latest(ada).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_delete_reading() {
        for backend in backends() {
            let ada = add_patient(&backend, "Ada").await;
            let repo = ReadingRepository::new(backend);

            let created = repo
                .create(reading_at(ada, "2024-03-01T08:00:00Z", 120))
                .await
                .unwrap();
            let id = Uuid::parse_str(&created.id).unwrap();

            repo.delete(id).await.unwrap();
            assert!(repo.get_by_id(id).await.unwrap().is_none());
            assert!(matches!(repo.delete(id).await, Err(RepositoryError::NotFound(_))));
        }
    }

    #[tokio::test]
    async fn test_deleting_patient_cascades_to_readings() {
        for backend in backends() {
            let ada = add_patient(&backend, "Ada").await;
            let bob = add_patient(&backend, "Bob").await;
            let patients = PatientRepository::new(backend.clone());
            let repo = ReadingRepository::new(backend);

            let first = repo.create(reading_at(ada, "2024-03-01T08:00:00Z", 120)).await.unwrap();
            repo.create(reading_at(ada, "2024-03-02T08:00:00Z", 125)).await.unwrap();
            repo.create(reading_at(bob, "2024-03-02T08:00:00Z", 130)).await.unwrap();

            let removed = patients.delete(ada).await.unwrap();
            assert_eq!(removed, 2);

            assert!(repo.get_for_patient(ada, None).await.unwrap().is_empty());
            assert!(repo
                .get_by_id(Uuid::parse_str(&first.id).unwrap())
                .await
                .unwrap()
                .is_none());
            assert_eq!(repo.get_for_patient(bob, None).await.unwrap().len(), 1);
        }
    }
}
