//! Storage seam for readings and patients.
//!
//! Two traits define the boundary the dashboard depends on:
//! - ReadingRepository: ordered reading windows + append
//! - PatientRepository: patient lookup and ward/room search
//!
//! `MemoryStore` is the only backend shipped here.

pub mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::models::{Patient, PatientFilter, PatientId, Reading};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Patient not found: {0}")]
    PatientNotFound(PatientId),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Timestamp-ordered reading storage.
pub trait ReadingRepository: Send + Sync {
    /// Newest-first readings for one patient, at most `limit`.
    /// Equal timestamps: the later-appended reading counts as newer.
    fn fetch_window(
        &self,
        patient_id: PatientId,
        limit: usize,
    ) -> Result<Vec<Reading>, RepositoryError>;

    /// Store one reading. The patient must exist.
    fn append(&self, reading: Reading) -> Result<(), RepositoryError>;

    /// Store many readings, all or none. Returns the count stored.
    fn append_batch(&self, readings: Vec<Reading>) -> Result<usize, RepositoryError>;
}

/// Patient registry.
pub trait PatientRepository: Send + Sync {
    fn get_patient(&self, id: PatientId) -> Result<Option<Patient>, RepositoryError>;

    /// Patients matching every supplied filter field, ordered by id.
    fn search_patients(&self, filter: &PatientFilter) -> Result<Vec<Patient>, RepositoryError>;

    /// Distinct ward names, sorted. Patients without a ward are skipped.
    fn list_wards(&self) -> Result<Vec<String>, RepositoryError>;
}
