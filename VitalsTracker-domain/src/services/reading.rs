use async_trait::async_trait;
use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use validator::Validate;

use vitals_tracker_data::models::ReadingRecord;
use vitals_tracker_data::repository::{
    PatientRepository, PatientRepositoryTrait, ReadingRepository, ReadingRepositoryTrait,
    RepositoryError, StorageBackend,
};

use crate::entities::assessment::Assessment;
use crate::entities::conversions;
use crate::entities::patient::Patient;
use crate::entities::reading::{CreateReadingRequest, Reading, VitalSigns};
use crate::entities::trends::{ReadingTrends, TREND_WINDOW};
use crate::services::classifier;
use crate::services::export::{self, CsvExport};
use crate::services::trends::build_trends;
use crate::services::validation::describe_validation_errors;

/// How far ahead of the server clock a reading timestamp may be
pub const FUTURE_TOLERANCE_MINUTES: i64 = 5;

/// Reading service errors
#[derive(Debug, Error)]
pub enum ReadingServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for ReadingServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ReadingServiceError::NotFound(msg),
            other => ReadingServiceError::RepositoryError(other.to_string()),
        }
    }
}

/// Trait for reading service operations
#[async_trait]
pub trait ReadingServiceTrait: Send + Sync {
    /// Validate a create reading request
    fn validate_create_request(&self, request: &CreateReadingRequest) -> Result<(), ReadingServiceError>;

    /// Classify a set of vital signs without storing anything
    fn assess(&self, vitals: &VitalSigns) -> Assessment;

    /// Record a reading for a patient
    async fn record_reading(
        &self,
        patient_id: &str,
        request: CreateReadingRequest,
    ) -> Result<Reading, ReadingServiceError>;

    /// A patient's readings, newest first
    async fn history(&self, patient_id: &str, limit: Option<usize>) -> Result<Vec<Reading>, ReadingServiceError>;

    /// The newest reading for a patient, if any
    async fn latest_reading(&self, patient_id: &str) -> Result<Option<Reading>, ReadingServiceError>;

    /// Classify the newest reading. Not found when the patient has none.
    async fn assess_latest(&self, patient_id: &str) -> Result<(Reading, Assessment), ReadingServiceError>;

    /// Delete one reading
    async fn delete_reading(&self, id: &str) -> Result<(), ReadingServiceError>;

    /// Chart series over the most recent readings
    async fn trends(&self, patient_id: &str) -> Result<ReadingTrends, ReadingServiceError>;

    /// The patient's full history as CSV
    async fn export_csv(&self, patient_id: &str) -> Result<CsvExport, ReadingServiceError>;
}

/// Reading service for domain logic
pub struct ReadingService<P: PatientRepositoryTrait, R: ReadingRepositoryTrait> {
    patients: P,
    readings: R,
}

impl<P: PatientRepositoryTrait, R: ReadingRepositoryTrait> ReadingService<P, R> {
    /// Create a new reading service
    pub fn new(patients: P, readings: R) -> Self {
        Self { patients, readings }
    }

    /// Resolve a patient ID, failing when it is malformed or unknown
    async fn require_patient(&self, patient_id: &str) -> Result<(Uuid, Patient), ReadingServiceError> {
        let id = conversions::parse_string_to_uuid(patient_id).map_err(ReadingServiceError::ValidationError)?;

        let record = self
            .patients
            .get_by_id(id)
            .await?
            .ok_or_else(|| ReadingServiceError::NotFound(format!("Patient with ID {} not found", patient_id)))?;

        Ok((id, conversions::convert_to_domain_patient(record)))
    }

    fn to_domain(records: Vec<ReadingRecord>) -> Result<Vec<Reading>, ReadingServiceError> {
        records
            .into_iter()
            .map(|record| {
                conversions::convert_to_domain_reading(record).map_err(|e| {
                    error!("Corrupt reading row: {}", e);
                    ReadingServiceError::RepositoryError(e)
                })
            })
            .collect()
    }
}

#[async_trait]
impl<P: PatientRepositoryTrait, R: ReadingRepositoryTrait> ReadingServiceTrait for ReadingService<P, R> {
    fn validate_create_request(&self, request: &CreateReadingRequest) -> Result<(), ReadingServiceError> {
        let rejected = |message: String| {
            warn!("Rejected reading: {}", message);
            ReadingServiceError::ValidationError(message)
        };

        if let Err(errors) = request.validate() {
            return Err(rejected(describe_validation_errors(&errors)));
        }

        if request.vitals().is_empty() {
            return Err(rejected("At least one vital sign must be provided".to_string()));
        }

        if let Some(timestamp) = request.timestamp {
            if timestamp > Utc::now() + Duration::minutes(FUTURE_TOLERANCE_MINUTES) {
                return Err(rejected(format!(
                    "timestamp: Reading time {} is in the future",
                    conversions::format_timestamp(&timestamp)
                )));
            }
        }

        Ok(())
    }

    fn assess(&self, vitals: &VitalSigns) -> Assessment {
        classifier::classify(vitals)
    }

    async fn record_reading(
        &self,
        patient_id: &str,
        request: CreateReadingRequest,
    ) -> Result<Reading, ReadingServiceError> {
        let id = conversions::parse_string_to_uuid(patient_id).map_err(ReadingServiceError::ValidationError)?;
        self.validate_create_request(&request)?;

        let data_request = conversions::convert_to_data_create_reading(id, &request, Utc::now());
        let record = self.readings.create(data_request).await.map_err(|err| match err {
            RepositoryError::NotFound(_) => {
                ReadingServiceError::NotFound(format!("Patient with ID {} not found", patient_id))
            }
            other => other.into(),
        })?;

        info!("Recorded reading {} for patient {}", record.id, patient_id);
        conversions::convert_to_domain_reading(record).map_err(ReadingServiceError::RepositoryError)
    }

    async fn history(&self, patient_id: &str, limit: Option<usize>) -> Result<Vec<Reading>, ReadingServiceError> {
        let (id, _) = self.require_patient(patient_id).await?;
        debug!("Loading history for patient {} (limit {:?})", id, limit);

        let records = self.readings.get_for_patient(id, limit).await?;
        Self::to_domain(records)
    }

    async fn latest_reading(&self, patient_id: &str) -> Result<Option<Reading>, ReadingServiceError> {
        let (id, _) = self.require_patient(patient_id).await?;

        match self.readings.get_latest(id).await? {
            Some(record) => conversions::convert_to_domain_reading(record)
                .map(Some)
                .map_err(ReadingServiceError::RepositoryError),
            None => Ok(None),
        }
    }

    async fn assess_latest(&self, patient_id: &str) -> Result<(Reading, Assessment), ReadingServiceError> {
        let reading = self.latest_reading(patient_id).await?.ok_or_else(|| {
            ReadingServiceError::NotFound(format!("Patient {} has no readings yet", patient_id))
        })?;

        let assessment = self.assess(&reading.vitals);
        if assessment.is_urgent() {
            warn!("Urgent finding for patient {} in reading {}", patient_id, reading.id);
        }
        Ok((reading, assessment))
    }

    async fn delete_reading(&self, id: &str) -> Result<(), ReadingServiceError> {
        let id_uuid = conversions::parse_string_to_uuid(id).map_err(ReadingServiceError::ValidationError)?;

        self.readings.delete(id_uuid).await.map_err(|err| match err {
            RepositoryError::NotFound(_) => {
                ReadingServiceError::NotFound(format!("Reading with ID {} not found", id))
            }
            other => other.into(),
        })?;

        info!("Deleted reading {}", id);
        Ok(())
    }

    async fn trends(&self, patient_id: &str) -> Result<ReadingTrends, ReadingServiceError> {
        // Blood pressure may reach back past the window
        let history = self.history(patient_id, None).await?;
        Ok(build_trends(&history, TREND_WINDOW))
    }

    async fn export_csv(&self, patient_id: &str) -> Result<CsvExport, ReadingServiceError> {
        let (id, patient) = self.require_patient(patient_id).await?;
        let readings = Self::to_domain(self.readings.get_for_patient(id, None).await?)?;

        info!("Exporting {} reading(s) for patient {}", readings.len(), patient_id);
        Ok(CsvExport {
            file_name: export::export_file_name(&patient),
            content: export::render_csv(&readings),
        })
    }
}

/// Create a reading service over the given storage
pub fn create_reading_service(
    backend: StorageBackend,
) -> ReadingService<PatientRepository, ReadingRepository> {
    ReadingService::new(
        PatientRepository::new(backend.clone()),
        ReadingRepository::new(backend),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::assessment::Severity;
    use crate::entities::patient::CreatePatientRequest;
    use crate::services::patient::{create_patient_service, PatientServiceTrait};
    use chrono::{DateTime, TimeZone};
    use vitals_tracker_data::repository::tests::FailingRepository;

    struct Fixture {
        service: ReadingService<PatientRepository, ReadingRepository>,
        patient: Patient,
    }

    async fn fixture() -> Fixture {
        let backend = StorageBackend::in_memory();
        let patient = create_patient_service(backend.clone())
            .create_patient(CreatePatientRequest {
                name: "Ada".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        Fixture {
            service: create_reading_service(backend),
            patient,
        }
    }

    fn at(day: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 3, day, 8, 0, 0).unwrap())
    }

    fn bp_request(day: u32, systolic: i32, diastolic: i32) -> CreateReadingRequest {
        CreateReadingRequest {
            timestamp: at(day),
            systolic: Some(systolic),
            diastolic: Some(diastolic),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_record_reading_defaults_timestamp_to_now() {
        let f = fixture().await;
        let before = Utc::now() - Duration::seconds(1);

        let reading = f
            .service
            .record_reading(
                &f.patient.id,
                CreateReadingRequest {
                    spo2: Some(97.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(reading.timestamp >= before);
        assert_eq!(reading.patient_id, f.patient.id);
        assert_eq!(reading.vitals.spo2, Some(97.0));
    }

    #[tokio::test]
    async fn test_record_reading_requires_a_vital() {
        let f = fixture().await;
        let result = f
            .service
            .record_reading(
                &f.patient.id,
                CreateReadingRequest {
                    notes: Some("forgot the cuff".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ReadingServiceError::ValidationError(_))));
        assert!(f.service.history(&f.patient.id, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_reading_rejects_future_and_out_of_range() {
        let f = fixture().await;

        let future = CreateReadingRequest {
            timestamp: Some(Utc::now() + Duration::hours(2)),
            temp_c: Some(36.6),
            ..Default::default()
        };
        assert!(matches!(
            f.service.record_reading(&f.patient.id, future).await,
            Err(ReadingServiceError::ValidationError(_))
        ));

        let implausible = CreateReadingRequest {
            spo2: Some(120.0),
            ..Default::default()
        };
        assert!(matches!(
            f.service.record_reading(&f.patient.id, implausible).await,
            Err(ReadingServiceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_record_reading_for_unknown_patient() {
        let f = fixture().await;
        let result = f
            .service
            .record_reading(&Uuid::new_v4().to_string(), bp_request(1, 120, 80))
            .await;
        assert!(matches!(result, Err(ReadingServiceError::NotFound(_))));

        let result = f.service.record_reading("bogus", bp_request(1, 120, 80)).await;
        assert!(matches!(result, Err(ReadingServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_history_latest_and_assessment() {
        let f = fixture().await;
        f.service.record_reading(&f.patient.id, bp_request(1, 118, 76)).await.unwrap();
        f.service.record_reading(&f.patient.id, bp_request(3, 185, 70)).await.unwrap();
        f.service.record_reading(&f.patient.id, bp_request(2, 145, 92)).await.unwrap();

        let history = f.service.history(&f.patient.id, None).await.unwrap();
        let systolics: Vec<Option<i32>> = history.iter().map(|r| r.vitals.systolic).collect();
        assert_eq!(systolics, vec![Some(185), Some(145), Some(118)]);

        assert_eq!(f.service.history(&f.patient.id, Some(1)).await.unwrap().len(), 1);

        let (latest, assessment) = f.service.assess_latest(&f.patient.id).await.unwrap();
        assert_eq!(latest.vitals.systolic, Some(185));
        assert_eq!(assessment.findings[0].severity, Severity::Critical);
        assert_eq!(assessment.lifestyle_tips.len(), 6);
    }

    #[tokio::test]
    async fn test_assess_latest_without_readings_is_not_found() {
        let f = fixture().await;
        assert!(f.service.latest_reading(&f.patient.id).await.unwrap().is_none());
        assert!(matches!(
            f.service.assess_latest(&f.patient.id).await,
            Err(ReadingServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_reading() {
        let f = fixture().await;
        let reading = f.service.record_reading(&f.patient.id, bp_request(1, 120, 80)).await.unwrap();

        f.service.delete_reading(&reading.id).await.unwrap();
        assert!(matches!(
            f.service.delete_reading(&reading.id).await,
            Err(ReadingServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_trends_and_export() {
        let f = fixture().await;
        f.service.record_reading(&f.patient.id, bp_request(2, 130, 85)).await.unwrap();
        f.service
            .record_reading(
                &f.patient.id,
                CreateReadingRequest {
                    timestamp: at(1),
                    glucose_mg_dl: Some(95.0),
                    notes: Some("fasting, morning".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let trends = f.service.trends(&f.patient.id).await.unwrap();
        assert_eq!(trends.blood_pressure.len(), 1);
        assert_eq!(trends.glucose.len(), 1);
        assert!(trends.spo2.is_empty());

        let export = f.service.export_csv(&f.patient.id).await.unwrap();
        assert_eq!(export.file_name, "Ada_history.csv");
        let lines: Vec<&str> = export.content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("2024-03-02T08:00:00Z,130,85"));
        assert!(lines[2].ends_with(",95,,,\"fasting, morning\""));
    }

    #[tokio::test]
    async fn test_trends_chart_older_blood_pressure() {
        let f = fixture().await;
        f.service.record_reading(&f.patient.id, bp_request(1, 128, 84)).await.unwrap();
        for minute in 0..TREND_WINDOW as i64 {
            f.service
                .record_reading(
                    &f.patient.id,
                    CreateReadingRequest {
                        timestamp: at(2).map(|t| t + chrono::Duration::minutes(minute)),
                        glucose_mg_dl: Some(100.0),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }

        let trends = f.service.trends(&f.patient.id).await.unwrap();
        assert_eq!(trends.glucose.len(), TREND_WINDOW);
        assert_eq!(trends.blood_pressure.len(), 1);
        assert_eq!(trends.blood_pressure[0].systolic, 128);
    }

    #[tokio::test]
    async fn test_repository_failures_surface_as_repository_errors() {
        let service = ReadingService::new(FailingRepository::new(), FailingRepository::new());
        let result = service.history(&Uuid::new_v4().to_string(), None).await;
        assert!(matches!(result, Err(ReadingServiceError::RepositoryError(_))));
    }
}
