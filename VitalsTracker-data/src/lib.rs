// Vitals Tracker Data
// This crate handles persistence for patients and their vital-sign readings

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
