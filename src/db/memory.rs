use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDateTime;

use super::{PatientRepository, ReadingRepository, RepositoryError};
use crate::models::{Gender, Patient, PatientFilter, PatientId, Reading};

/// A reading plus its append sequence, used as the timestamp tie-break.
struct StoredReading {
    seq: u64,
    reading: Reading,
}

#[derive(Default)]
struct StoreInner {
    patients: BTreeMap<PatientId, Patient>,
    readings: Vec<StoredReading>,
    next_seq: u64,
}

impl StoreInner {
    fn require_patient(&self, id: PatientId) -> Result<(), RepositoryError> {
        if self.patients.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::PatientNotFound(id))
        }
    }

    fn push(&mut self, reading: Reading) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.readings.push(StoredReading { seq, reading });
    }
}

/// In-memory patient and reading store backed by RwLock.
///
/// Constructed explicitly and handed to its users; there is no global instance.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the single demo ICU patient.
    pub fn with_demo_patient(created_at: NaiveDateTime) -> Self {
        let store = Self::new();
        let demo = Patient {
            id: PatientId(1),
            name: "John Doe".into(),
            mrn: "MRN-001".into(),
            age: Some(45),
            gender: Some(Gender::Male),
            ward: Some("ICU".into()),
            room: Some("101".into()),
            created_at,
        };
        if let Ok(mut inner) = store.inner.write() {
            inner.patients.insert(demo.id, demo);
        }
        store
    }

    /// Register a patient. Ids and MRNs must be unique.
    pub fn insert_patient(&self, patient: Patient) -> Result<(), RepositoryError> {
        let mut inner = self.write()?;
        if inner.patients.contains_key(&patient.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "duplicate patient id {}",
                patient.id
            )));
        }
        if inner.patients.values().any(|p| p.mrn == patient.mrn) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "duplicate MRN {}",
                patient.mrn
            )));
        }
        tracing::debug!(patient_id = %patient.id, "Patient registered");
        inner.patients.insert(patient.id, patient);
        Ok(())
    }

    /// Total readings across all patients.
    pub fn reading_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.read()?.readings.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreInner>, RepositoryError> {
        self.inner.read().map_err(|_| RepositoryError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreInner>, RepositoryError> {
        self.inner.write().map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl ReadingRepository for MemoryStore {
    fn fetch_window(
        &self,
        patient_id: PatientId,
        limit: usize,
    ) -> Result<Vec<Reading>, RepositoryError> {
        let inner = self.read()?;

        let mut rows: Vec<&StoredReading> = inner
            .readings
            .iter()
            .filter(|s| s.reading.patient_id == patient_id)
            .collect();

        rows.sort_by(|a, b| {
            b.reading
                .timestamp
                .cmp(&a.reading.timestamp)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(rows
            .into_iter()
            .take(limit)
            .map(|s| s.reading.clone())
            .collect())
    }

    fn append(&self, reading: Reading) -> Result<(), RepositoryError> {
        let mut inner = self.write()?;
        inner.require_patient(reading.patient_id)?;
        inner.push(reading);
        Ok(())
    }

    fn append_batch(&self, readings: Vec<Reading>) -> Result<usize, RepositoryError> {
        let mut inner = self.write()?;

        // Validate everything before the first insert so a failure stores nothing.
        for reading in &readings {
            inner.require_patient(reading.patient_id)?;
        }

        let count = readings.len();
        for reading in readings {
            inner.push(reading);
        }
        Ok(count)
    }
}

impl PatientRepository for MemoryStore {
    fn get_patient(&self, id: PatientId) -> Result<Option<Patient>, RepositoryError> {
        Ok(self.read()?.patients.get(&id).cloned())
    }

    fn search_patients(&self, filter: &PatientFilter) -> Result<Vec<Patient>, RepositoryError> {
        Ok(self
            .read()?
            .patients
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    fn list_wards(&self) -> Result<Vec<String>, RepositoryError> {
        let wards: BTreeSet<String> = self
            .read()?
            .patients
            .values()
            .filter_map(|p| p.ward.clone())
            .collect();
        Ok(wards.into_iter().collect())
    }
}
