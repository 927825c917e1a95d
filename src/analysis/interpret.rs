//! Clinical notes derived from the score and the raw vitals.
//!
//! Rules run in a fixed order and each appends at most one note.

use serde::{Deserialize, Serialize};

use super::score::{HIGH_THRESHOLD, MEDIUM_THRESHOLD};

pub const NOTE_CRITICAL: &str = "CRITICAL: Immediate ICU review required";
pub const NOTE_URGENT: &str = "URGENT: Urgent clinical review required";
pub const NOTE_TACHYCARDIA: &str = "Tachycardia";
pub const NOTE_HYPOXIA: &str = "Hypoxia";
pub const NOTE_FEVER: &str = "Fever";
pub const NOTE_STABLE: &str = "Patient Stable";
pub const NOTE_NO_DATA: &str = "No Data";

/// Separator used when the notes are shown as one line.
pub const NOTE_SEPARATOR: &str = ". ";

const TACHYCARDIA_ABOVE: i32 = 100;
const HYPOXIA_BELOW: i32 = 94;
const FEVER_ABOVE: f64 = 38.0;

/// Ordered clinical notes. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interpretation(Vec<String>);

impl Interpretation {
    /// Sentinel for a patient with no readings.
    pub fn no_data() -> Self {
        Self(vec![NOTE_NO_DATA.to_string()])
    }

    pub fn notes(&self) -> &[String] {
        &self.0
    }

    pub fn is_stable(&self) -> bool {
        self.0.len() == 1 && self.0[0] == NOTE_STABLE
    }

    /// Notes joined for single-line display.
    pub fn render(&self) -> String {
        self.0.join(NOTE_SEPARATOR)
    }
}

/// Apply the note rules to one set of vitals and its score.
pub fn interpret(heart_rate: i32, spo2: i32, temperature: f64, score: u8) -> Interpretation {
    let mut notes = Vec::new();

    if score >= HIGH_THRESHOLD {
        notes.push(NOTE_CRITICAL.to_string());
    } else if score >= MEDIUM_THRESHOLD {
        notes.push(NOTE_URGENT.to_string());
    }

    if heart_rate > TACHYCARDIA_ABOVE {
        notes.push(NOTE_TACHYCARDIA.to_string());
    }
    if spo2 < HYPOXIA_BELOW {
        notes.push(NOTE_HYPOXIA.to_string());
    }
    if temperature > FEVER_ABOVE {
        notes.push(NOTE_FEVER.to_string());
    }

    if notes.is_empty() {
        notes.push(NOTE_STABLE.to_string());
    }

    Interpretation(notes)
}
