// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

// Re-export the failing repository from the data layer
pub use vitals_tracker_data::repository::tests::FailingRepository;
use vitals_tracker_data::repository::StorageBackend;

use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth};
use crate::services::{
    create_patient_service, create_reading_service, PatientService, PatientServiceTrait,
    ReadingService, ReadingServiceTrait,
};

/// Patient and reading services sharing one store
pub struct ServicePair {
    pub patients: Arc<dyn PatientServiceTrait>,
    pub readings: Arc<dyn ReadingServiceTrait>,
}

/// Services over fresh in-memory storage
pub fn in_memory_services() -> ServicePair {
    let backend = StorageBackend::in_memory();
    ServicePair {
        patients: Arc::new(create_patient_service(backend.clone())),
        readings: Arc::new(create_reading_service(backend)),
    }
}

/// Services whose storage fails on every call
pub fn failing_services() -> ServicePair {
    ServicePair {
        patients: Arc::new(PatientService::new(FailingRepository::new())),
        readings: Arc::new(ReadingService::new(FailingRepository::new(), FailingRepository::new())),
    }
}

/// Mock implementation of health services for testing system health
#[derive(Debug)]
pub struct MockHealthService {
    /// Database component status
    database_status: ComponentStatus,
    /// Additional components
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a new mock health service with all components healthy
    pub fn new() -> Self {
        Self {
            database_status: ComponentStatus::Healthy,
            components: HashMap::new(),
        }
    }

    /// Configure the mock as if running on in-memory storage
    pub fn with_degraded_database(mut self) -> Self {
        self.database_status = ComponentStatus::Degraded;
        self
    }

    /// Configure the mock with an unreachable database
    pub fn with_unhealthy_database(mut self) -> Self {
        self.database_status = ComponentStatus::Unhealthy;
        self
    }

    /// Add a custom component with a specific status
    pub fn with_component(mut self, name: &str, status: ComponentStatus, details: Option<String>) -> Self {
        self.components
            .insert(name.to_string(), HealthComponent { status, details });
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = self.components.clone();

        components.insert(
            "database".to_string(),
            HealthComponent {
                status: self.database_status.clone(),
                details: match self.database_status {
                    ComponentStatus::Healthy => None,
                    ComponentStatus::Degraded => Some("Using in-memory storage".to_string()),
                    ComponentStatus::Unhealthy => Some("Database connection failed".to_string()),
                },
            },
        );

        SystemHealth::from_components(components)
    }

    async fn check_database_status(&self) -> Result<bool, String> {
        match self.database_status {
            ComponentStatus::Healthy => Ok(true),
            ComponentStatus::Degraded => Ok(false),
            ComponentStatus::Unhealthy => Err("Database connection failed".to_string()),
        }
    }
}

/// Factory function to create a mock health service
pub fn create_mock_health_service() -> impl HealthServiceTrait {
    MockHealthService::new()
}
