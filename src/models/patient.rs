use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::Gender;
use super::reading::PatientId;

/// A monitored patient and their bed location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    /// Medical record number, unique per patient.
    pub mrn: String,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub ward: Option<String>,
    pub room: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Ward/room filter for patient search. `None` fields do not filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientFilter {
    pub ward: Option<String>,
    pub room: Option<String>,
}

impl PatientFilter {
    pub fn matches(&self, patient: &Patient) -> bool {
        let ward_ok = self
            .ward
            .as_deref()
            .map_or(true, |w| patient.ward.as_deref() == Some(w));
        let room_ok = self
            .room
            .as_deref()
            .map_or(true, |r| patient.room.as_deref() == Some(r));
        ward_ok && room_ok
    }
}
