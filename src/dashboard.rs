//! Dashboard service: the caller that wires storage to the analysis engine.
//!
//! The store is handed in at construction. Each request fetches a bounded,
//! newest-first window and runs the pure aggregation over it.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::analysis::{aggregate, Dashboard};
use crate::config::HISTORY_WINDOW;
use crate::db::{PatientRepository, ReadingRepository, RepositoryError};
use crate::ingest::{import_rows, ImportError, ImportReport, RawRow};
use crate::models::{Patient, PatientFilter, PatientId, Reading};

pub struct DashboardService<S> {
    store: Arc<S>,
    window: usize,
}

impl<S> Clone for DashboardService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            window: self.window,
        }
    }
}

impl<S> DashboardService<S>
where
    S: ReadingRepository + PatientRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_window(store, HISTORY_WINDOW)
    }

    /// Service with a custom history window. A zero window is raised to one.
    pub fn with_window(store: Arc<S>, window: usize) -> Self {
        Self {
            store,
            window: window.max(1),
        }
    }

    /// Current dashboard payload for one patient.
    ///
    /// A patient with no readings yields the "No Data" payload, not an error.
    pub fn dashboard(&self, patient_id: PatientId) -> Result<Dashboard, RepositoryError> {
        let readings = self.store.fetch_window(patient_id, self.window)?;
        let dashboard = aggregate(patient_id, &readings);

        tracing::debug!(
            patient_id = %patient_id,
            readings = readings.len(),
            score = dashboard.analysis.score,
            tier = %dashboard.analysis.risk_tier,
            "Dashboard computed"
        );

        if dashboard.analysis.escalate {
            tracing::warn!(
                patient_id = %patient_id,
                score = dashboard.analysis.score,
                "Early-warning score requires ICU escalation"
            );
        }

        Ok(dashboard)
    }

    /// Record a single manually entered reading.
    pub fn record(&self, reading: Reading) -> Result<(), RepositoryError> {
        tracing::debug!(patient_id = %reading.patient_id, "Reading recorded");
        self.store.append(reading)
    }

    /// Bulk import of spreadsheet rows for one patient.
    pub fn import(
        &self,
        patient_id: PatientId,
        rows: &[RawRow],
        reference_date: NaiveDate,
    ) -> Result<ImportReport, ImportError> {
        import_rows(self.store.as_ref(), patient_id, rows, reference_date)
    }

    pub fn patient(&self, patient_id: PatientId) -> Result<Option<Patient>, RepositoryError> {
        self.store.get_patient(patient_id)
    }

    pub fn search_patients(&self, filter: &PatientFilter) -> Result<Vec<Patient>, RepositoryError> {
        self.store.search_patients(filter)
    }

    pub fn wards(&self) -> Result<Vec<String>, RepositoryError> {
        self.store.list_wards()
    }
}
