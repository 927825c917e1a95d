use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::VitalParameter;

/// Identifier of a monitored patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub i64);

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One timestamped vitals observation. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: Uuid,
    pub patient_id: PatientId,
    pub timestamp: NaiveDateTime,
    /// Beats per minute.
    pub heart_rate: i32,
    /// Oxygen saturation, percent. Not range-checked.
    pub spo2: i32,
    /// Degrees Celsius.
    pub temperature: f64,
}

impl Reading {
    pub fn new(
        patient_id: PatientId,
        timestamp: NaiveDateTime,
        heart_rate: i32,
        spo2: i32,
        temperature: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            timestamp,
            heart_rate,
            spo2,
            temperature,
        }
    }

    /// Value of one parameter, widened to f64 for display and charting.
    pub fn value(&self, parameter: VitalParameter) -> f64 {
        match parameter {
            VitalParameter::HeartRate => f64::from(self.heart_rate),
            VitalParameter::Spo2 => f64::from(self.spo2),
            VitalParameter::Temperature => self.temperature,
        }
    }
}
