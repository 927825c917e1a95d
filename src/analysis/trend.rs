use std::collections::BTreeMap;

use crate::models::{Reading, Trend, VitalParameter};

/// Two-point comparison of one value against its predecessor.
///
/// A missing predecessor reads as STABLE, same as an unchanged value.
/// Incomparable values (NaN temperatures) are also STABLE.
pub fn trend<T: PartialOrd>(current: T, previous: Option<T>) -> Trend {
    match previous {
        None => Trend::Stable,
        Some(prev) if current > prev => Trend::Up,
        Some(prev) if current < prev => Trend::Down,
        Some(_) => Trend::Stable,
    }
}

/// Trend of every parameter from `previous` to `current`.
pub fn trends(current: &Reading, previous: Option<&Reading>) -> BTreeMap<VitalParameter, Trend> {
    VitalParameter::ALL
        .iter()
        .map(|&param| {
            let direction = match param {
                VitalParameter::HeartRate => {
                    trend(current.heart_rate, previous.map(|p| p.heart_rate))
                }
                VitalParameter::Spo2 => trend(current.spo2, previous.map(|p| p.spo2)),
                VitalParameter::Temperature => {
                    trend(current.temperature, previous.map(|p| p.temperature))
                }
            };
            (param, direction)
        })
        .collect()
}
