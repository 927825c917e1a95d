use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::interpret::{interpret, Interpretation};
use super::score::{breakdown, ScoreBreakdown};
use super::status::statuses;
use super::trend::trends;
use crate::models::{PatientId, Reading, RiskTier, Trend, VitalParameter, VitalStatus};

/// Derived risk signal for the latest reading. Recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: u8,
    pub risk_tier: RiskTier,
    /// Set for HIGH tier; drives the ICU escalation banner.
    pub escalate: bool,
    pub breakdown: ScoreBreakdown,
    pub trends: BTreeMap<VitalParameter, Trend>,
    pub statuses: BTreeMap<VitalParameter, VitalStatus>,
    pub interpretation: Interpretation,
    /// `interpretation` rendered as one line.
    pub summary: String,
}

impl AnalysisResult {
    /// Result for a patient without readings.
    pub fn no_data() -> Self {
        let interpretation = Interpretation::no_data();
        Self {
            score: 0,
            risk_tier: RiskTier::Low,
            escalate: false,
            breakdown: ScoreBreakdown::default(),
            trends: BTreeMap::new(),
            statuses: BTreeMap::new(),
            summary: interpretation.render(),
            interpretation,
        }
    }

    /// Full analysis of `latest` against the reading before it.
    pub fn analyze(latest: &Reading, previous: Option<&Reading>) -> Self {
        let breakdown = breakdown(latest.heart_rate, latest.spo2, latest.temperature);
        let score = breakdown.total();
        let risk_tier = RiskTier::from_score(score);
        let interpretation = interpret(latest.heart_rate, latest.spo2, latest.temperature, score);

        Self {
            score,
            risk_tier,
            escalate: risk_tier.escalates(),
            breakdown,
            trends: trends(latest, previous),
            statuses: statuses(latest),
            summary: interpretation.render(),
            interpretation,
        }
    }
}

/// Dashboard payload for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub patient_id: PatientId,
    /// Most recent reading; `None` when the patient has none.
    pub latest: Option<Reading>,
    /// Oldest first, for charting.
    pub history: Vec<Reading>,
    pub analysis: AnalysisResult,
}

/// Build the dashboard from a newest-first window of readings.
///
/// The input order is trusted: index 0 is the latest reading and index 1 the
/// previous one. Nothing is re-sorted here.
pub fn aggregate(patient_id: PatientId, newest_first: &[Reading]) -> Dashboard {
    let history: Vec<Reading> = newest_first.iter().rev().cloned().collect();

    let Some(latest) = newest_first.first() else {
        return Dashboard {
            patient_id,
            latest: None,
            history,
            analysis: AnalysisResult::no_data(),
        };
    };

    let analysis = AnalysisResult::analyze(latest, newest_first.get(1));

    Dashboard {
        patient_id,
        latest: Some(latest.clone()),
        history,
        analysis,
    }
}
