use std::collections::BTreeMap;

use crate::models::{Reading, VitalParameter, VitalStatus};

const HEART_RATE_HIGH_ABOVE: i32 = 100;
const HEART_RATE_LOW_BELOW: i32 = 60;
const SPO2_LOW_BELOW: i32 = 94;
const TEMPERATURE_HIGH_ABOVE: f64 = 38.0;

/// Bedside flag for a heart rate.
pub fn heart_rate_status(heart_rate: i32) -> VitalStatus {
    if heart_rate > HEART_RATE_HIGH_ABOVE {
        VitalStatus::High
    } else if heart_rate < HEART_RATE_LOW_BELOW {
        VitalStatus::Low
    } else {
        VitalStatus::Ok
    }
}

/// Bedside flag for an SpO2 value. There is no HIGH flag for saturation.
pub fn spo2_status(spo2: i32) -> VitalStatus {
    if spo2 < SPO2_LOW_BELOW {
        VitalStatus::Low
    } else {
        VitalStatus::Ok
    }
}

/// Bedside flag for a temperature. Only fever is flagged.
pub fn temperature_status(temperature: f64) -> VitalStatus {
    if temperature > TEMPERATURE_HIGH_ABOVE {
        VitalStatus::High
    } else {
        VitalStatus::Ok
    }
}

/// Flags for every parameter of one reading.
pub fn statuses(reading: &Reading) -> BTreeMap<VitalParameter, VitalStatus> {
    BTreeMap::from([
        (VitalParameter::HeartRate, heart_rate_status(reading.heart_rate)),
        (VitalParameter::Spo2, spo2_status(reading.spo2)),
        (VitalParameter::Temperature, temperature_status(reading.temperature)),
    ])
}
