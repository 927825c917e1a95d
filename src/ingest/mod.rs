//! Bulk vitals import.
//!
//! Rows arrive already decoded from the spreadsheet as loosely typed JSON
//! values. Every row either becomes a fully typed `Reading` or a
//! `RowRejection`; nothing partially typed reaches the store.

pub mod normalize;

pub use normalize::*;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::db::{PatientRepository, ReadingRepository, RepositoryError};
use crate::models::PatientId;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unknown patient: {0}")]
    UnknownPatient(PatientId),

    #[error("Import batch is empty")]
    EmptyBatch,

    #[error("All {} rows were rejected", .rejected.len())]
    AllRowsRejected { rejected: Vec<RowRejection> },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Outcome of a successful import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub imported: usize,
    pub rejections: Vec<RowRejection>,
}

/// Normalize `rows` for `patient_id` and store the accepted readings in one batch.
///
/// Bare time-of-day values are dated with `reference_date`. Rejected rows are
/// reported, not stored; the accepted rows are still imported.
pub fn import_rows<S>(
    store: &S,
    patient_id: PatientId,
    rows: &[RawRow],
    reference_date: NaiveDate,
) -> Result<ImportReport, ImportError>
where
    S: ReadingRepository + PatientRepository + ?Sized,
{
    if rows.is_empty() {
        return Err(ImportError::EmptyBatch);
    }

    if store.get_patient(patient_id)?.is_none() {
        return Err(ImportError::UnknownPatient(patient_id));
    }

    let batch = normalize_rows(patient_id, rows, reference_date);

    if !batch.rejections.is_empty() {
        tracing::warn!(
            patient_id = %patient_id,
            rejected = batch.rejections.len(),
            total = rows.len(),
            "Import rows rejected"
        );
    }

    if batch.readings.is_empty() {
        return Err(ImportError::AllRowsRejected {
            rejected: batch.rejections,
        });
    }

    let imported = store.append_batch(batch.readings)?;
    tracing::info!(patient_id = %patient_id, imported, "Vitals imported");

    Ok(ImportReport {
        imported,
        rejections: batch.rejections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use serde_json::json;

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn rows(value: serde_json::Value) -> Vec<RawRow> {
        serde_json::from_value(value).unwrap()
    }

    fn test_store() -> MemoryStore {
        MemoryStore::with_demo_patient(reference_date().and_hms_opt(0, 0, 0).unwrap())
    }

    #[test]
    fn imports_valid_rows() {
        let store = test_store();
        let input = rows(json!([
            {"Time": "08:00", "HeartRate": 72, "SpO2": 98, "Temperature": 36.8},
            {"Time": "08:15:00", "HeartRate": "75", "SpO2": "97", "Temperature": "37.0"},
        ]));

        let report = import_rows(&store, PatientId(1), &input, reference_date()).unwrap();
        assert_eq!(report.imported, 2);
        assert!(report.rejections.is_empty());

        let window = store.fetch_window(PatientId(1), 10).unwrap();
        assert_eq!(window[0].heart_rate, 75);
        assert_eq!(
            window[0].timestamp,
            reference_date().and_hms_opt(8, 15, 0).unwrap()
        );
    }

    #[test]
    fn partial_batch_reports_rejections() {
        let store = test_store();
        let input = rows(json!([
            {"Time": "08:00", "HeartRate": 72, "SpO2": 98, "Temperature": 36.8},
            {"Time": "08:05", "SpO2": 98, "Temperature": 36.8},
        ]));

        let report = import_rows(&store, PatientId(1), &input, reference_date()).unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.rejections.len(), 1);
        assert_eq!(report.rejections[0].row, 1);
        assert_eq!(store.reading_count().unwrap(), 1);
    }

    #[test]
    fn unknown_patient_is_refused() {
        let store = test_store();
        let input = rows(json!([
            {"Time": "08:00", "HeartRate": 72, "SpO2": 98, "Temperature": 36.8},
        ]));
        let result = import_rows(&store, PatientId(2), &input, reference_date());
        assert!(matches!(result, Err(ImportError::UnknownPatient(PatientId(2)))));
        assert_eq!(store.reading_count().unwrap(), 0);
    }

    #[test]
    fn empty_batch_is_refused() {
        let store = test_store();
        let result = import_rows(&store, PatientId(1), &[], reference_date());
        assert!(matches!(result, Err(ImportError::EmptyBatch)));
    }

    #[test]
    fn all_rejected_stores_nothing() {
        let store = test_store();
        let input = rows(json!([
            {"Time": "later", "HeartRate": 72, "SpO2": 98, "Temperature": 36.8},
        ]));
        let err = import_rows(&store, PatientId(1), &input, reference_date()).unwrap_err();
        match err {
            ImportError::AllRowsRejected { rejected } => assert_eq!(rejected.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.reading_count().unwrap(), 0);
    }
}
