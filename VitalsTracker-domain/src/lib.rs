// Vitals Tracker Domain
// This crate contains the business logic for the Vitals Tracker service

// Domain entities
pub mod entities;

// Services that implement business logic
pub mod services;

// Health checks and system status
pub mod health;

// Re-export the storage modules from the data layer for convenience
pub use vitals_tracker_data::database;
pub use vitals_tracker_data::repository::StorageBackend;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
