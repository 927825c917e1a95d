use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::TIMESTAMP_FORMAT;
use crate::models::{PatientId, Reading};

/// Accepted layouts for a full timestamp, tried in order before RFC 3339.
const TIMESTAMP_LAYOUTS: [&str; 4] = [
    TIMESTAMP_FORMAT,
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Accepted layouts for a bare time of day.
const TIME_OF_DAY_LAYOUTS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// One spreadsheet row as decoded upstream. Keys follow the sheet header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Time", default)]
    pub time: Option<Value>,
    #[serde(rename = "HeartRate", default)]
    pub heart_rate: Option<Value>,
    #[serde(rename = "SpO2", default)]
    pub spo2: Option<Value>,
    #[serde(rename = "Temperature", default)]
    pub temperature: Option<Value>,
}

/// Why a row was not turned into a reading.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("{field} is not a valid number: {value}")]
    NotANumber { field: &'static str, value: String },

    #[error("unrecognized time: {0}")]
    BadTime(String),
}

/// A rejected row and the first problem found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    /// Zero-based position in the submitted batch.
    pub row: usize,
    pub reason: RejectReason,
}

/// Typed readings plus the rows that could not be typed.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub readings: Vec<Reading>,
    pub rejections: Vec<RowRejection>,
}

/// Convert every row, keeping input order among the accepted readings.
pub fn normalize_rows(
    patient_id: PatientId,
    rows: &[RawRow],
    reference_date: NaiveDate,
) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for (row, raw) in rows.iter().enumerate() {
        match normalize_row(patient_id, raw, reference_date) {
            Ok(reading) => batch.readings.push(reading),
            Err(reason) => batch.rejections.push(RowRejection { row, reason }),
        }
    }

    batch
}

/// Convert one row into a reading.
pub fn normalize_row(
    patient_id: PatientId,
    raw: &RawRow,
    reference_date: NaiveDate,
) -> Result<Reading, RejectReason> {
    let timestamp = parse_timestamp(present(&raw.time, "Time")?, reference_date)?;
    let heart_rate = parse_integer(present(&raw.heart_rate, "HeartRate")?, "HeartRate")?;
    let spo2 = parse_integer(present(&raw.spo2, "SpO2")?, "SpO2")?;
    let temperature = parse_real(present(&raw.temperature, "Temperature")?, "Temperature")?;

    Ok(Reading::new(
        patient_id,
        timestamp,
        heart_rate,
        spo2,
        temperature,
    ))
}

fn present<'a>(value: &'a Option<Value>, field: &'static str) -> Result<&'a Value, RejectReason> {
    match value {
        None | Some(Value::Null) => Err(RejectReason::MissingField(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(RejectReason::MissingField(field)),
        Some(v) => Ok(v),
    }
}

/// Parse a full timestamp, or date a bare time of day with `reference_date`.
pub fn parse_timestamp(
    value: &Value,
    reference_date: NaiveDate,
) -> Result<NaiveDateTime, RejectReason> {
    let text = match value {
        Value::String(s) => s.trim(),
        other => return Err(RejectReason::BadTime(other.to_string())),
    };

    let is_time_of_day = !text.contains(' ') && !text.contains('T');
    if is_time_of_day {
        return TIME_OF_DAY_LAYOUTS
            .iter()
            .find_map(|layout| NaiveTime::parse_from_str(text, layout).ok())
            .map(|time| reference_date.and_time(time))
            .ok_or_else(|| RejectReason::BadTime(text.to_string()));
    }

    TIMESTAMP_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .ok_or_else(|| RejectReason::BadTime(text.to_string()))
}

fn not_a_number(field: &'static str, value: &Value) -> RejectReason {
    let value = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    RejectReason::NotANumber { field, value }
}

fn parse_integer(value: &Value, field: &'static str) -> Result<i32, RejectReason> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n)
            if n.is_finite()
                && n.fract() == 0.0
                && n >= f64::from(i32::MIN)
                && n <= f64::from(i32::MAX) =>
        {
            Ok(n as i32)
        }
        _ => Err(not_a_number(field, value)),
    }
}

fn parse_real(value: &Value, field: &'static str) -> Result<f64, RejectReason> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(not_a_number(field, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn row(value: Value) -> RawRow {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn bare_time_uses_reference_date() {
        let ts = parse_timestamp(&json!("14:30"), day()).unwrap();
        assert_eq!(ts, day().and_hms_opt(14, 30, 0).unwrap());
        let ts = parse_timestamp(&json!("06:05:09"), day()).unwrap();
        assert_eq!(ts, day().and_hms_opt(6, 5, 9).unwrap());
    }

    #[test]
    fn full_timestamp_ignores_reference_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        for text in [
            "2025-12-31 23:59:00",
            "2025-12-31 23:59",
            "2025-12-31T23:59:00",
            "2025-12-31T23:59:00+02:00",
        ] {
            assert_eq!(parse_timestamp(&json!(text), day()).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn bad_times_are_rejected() {
        assert!(matches!(parse_timestamp(&json!("25:00"), day()), Err(RejectReason::BadTime(_))));
        assert!(matches!(parse_timestamp(&json!("noon"), day()), Err(RejectReason::BadTime(_))));
        assert!(matches!(parse_timestamp(&json!(0.5), day()), Err(RejectReason::BadTime(_))));
    }

    #[test]
    fn numbers_and_numeric_strings_accepted() {
        let r = normalize_row(
            PatientId(1),
            &row(json!({
                "Time": "08:00",
                "HeartRate": "88",
                "SpO2": 96.0,
                "Temperature": " 37.2 ",
            })),
            day(),
        )
        .unwrap();
        assert_eq!(r.heart_rate, 88);
        assert_eq!(r.spo2, 96);
        assert!((r.temperature - 37.2).abs() < 1e-9);
        assert_eq!(r.patient_id, PatientId(1));
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let r = normalize_row(
            PatientId(1),
            &row(json!({"Time": "08:00", "HeartRate": -10, "SpO2": 120, "Temperature": 20.0})),
            day(),
        )
        .unwrap();
        assert_eq!(r.heart_rate, -10);
        assert_eq!(r.spo2, 120);
    }

    #[test]
    fn missing_and_malformed_fields() {
        let missing = normalize_row(
            PatientId(1),
            &row(json!({"Time": "08:00", "HeartRate": 70, "Temperature": 37.0})),
            day(),
        );
        assert_eq!(missing.unwrap_err(), RejectReason::MissingField("SpO2"));

        let blank = normalize_row(
            PatientId(1),
            &row(json!({"Time": "  ", "HeartRate": 70, "SpO2": 98, "Temperature": 37.0})),
            day(),
        );
        assert_eq!(blank.unwrap_err(), RejectReason::MissingField("Time"));

        let fractional = normalize_row(
            PatientId(1),
            &row(json!({"Time": "08:00", "HeartRate": 70.5, "SpO2": 98, "Temperature": 37.0})),
            day(),
        );
        assert!(matches!(
            fractional.unwrap_err(),
            RejectReason::NotANumber { field: "HeartRate", .. }
        ));

        let nan = normalize_row(
            PatientId(1),
            &row(json!({"Time": "08:00", "HeartRate": 70, "SpO2": 98, "Temperature": "NaN"})),
            day(),
        );
        assert_eq!(
            nan.unwrap_err(),
            RejectReason::NotANumber {
                field: "Temperature",
                value: "NaN".into()
            }
        );
    }

    #[test]
    fn batch_keeps_order_and_indexes_rejections() {
        let rows = vec![
            row(json!({"Time": "08:00", "HeartRate": 70, "SpO2": 98, "Temperature": 37.0})),
            row(json!({"Time": "08:05", "HeartRate": "fast", "SpO2": 98, "Temperature": 37.0})),
            row(json!({"Time": "08:10", "HeartRate": 74, "SpO2": 97, "Temperature": 37.1})),
        ];
        let batch = normalize_rows(PatientId(1), &rows, day());
        let rates: Vec<_> = batch.readings.iter().map(|r| r.heart_rate).collect();
        assert_eq!(rates, vec![70, 74]);
        assert_eq!(batch.rejections.len(), 1);
        assert_eq!(batch.rejections[0].row, 1);
        assert_eq!(
            batch.rejections[0].reason.to_string(),
            "HeartRate is not a valid number: fast"
        );
    }

    #[test]
    fn rejection_serializes_with_kind_tag() {
        let rejection = RowRejection {
            row: 3,
            reason: RejectReason::MissingField("Time"),
        };
        let json = serde_json::to_value(&rejection).unwrap();
        assert_eq!(json["row"], 3);
        assert_eq!(json["reason"]["kind"], "missing_field");
        assert_eq!(json["reason"]["detail"], "Time");
    }
}
