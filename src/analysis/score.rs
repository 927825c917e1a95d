//! Early-warning severity score.
//!
//! Each vital contributes 0-3 points from a fixed band table and the total
//! is the sum of the three contributions, never the worst single band.
//! Bands are checked high-severity first; the first match wins.

use serde::{Deserialize, Serialize};

use crate::models::{Reading, RiskTier};

/// Highest possible total: three parameters at 3 points each.
pub const MAX_SCORE: u8 = 9;

/// Scores at or above this are HIGH and flag escalation.
pub const HIGH_THRESHOLD: u8 = 7;

/// Scores at or above this (and below HIGH) are MEDIUM.
pub const MEDIUM_THRESHOLD: u8 = 5;

/// Per-parameter points behind a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub heart_rate: u8,
    pub spo2: u8,
    pub temperature: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        self.heart_rate + self.spo2 + self.temperature
    }
}

/// Heart rate band points (bpm).
pub fn heart_rate_points(heart_rate: i32) -> u8 {
    if heart_rate <= 40 || heart_rate >= 131 {
        3
    } else if heart_rate >= 111 {
        2
    } else if heart_rate <= 50 || heart_rate >= 91 {
        1
    } else {
        0
    }
}

/// SpO2 band points (%).
pub fn spo2_points(spo2: i32) -> u8 {
    if spo2 <= 91 {
        3
    } else if spo2 <= 93 {
        2
    } else if spo2 <= 95 {
        1
    } else {
        0
    }
}

/// Temperature band points (°C).
///
/// Values between the listed band edges (e.g. 39.05) fall through the chain
/// in order, so 39.05 scores 1 and 36.05 scores 0. NaN matches no band.
pub fn temperature_points(temperature: f64) -> u8 {
    if temperature <= 35.0 {
        3
    } else if temperature >= 39.1 {
        2
    } else if temperature >= 38.1 || temperature <= 36.0 {
        1
    } else {
        0
    }
}

/// Per-parameter contributions for one set of measurements.
pub fn breakdown(heart_rate: i32, spo2: i32, temperature: f64) -> ScoreBreakdown {
    ScoreBreakdown {
        heart_rate: heart_rate_points(heart_rate),
        spo2: spo2_points(spo2),
        temperature: temperature_points(temperature),
    }
}

/// Total severity score in `0..=MAX_SCORE`. Total over every input.
pub fn score(heart_rate: i32, spo2: i32, temperature: f64) -> u8 {
    breakdown(heart_rate, spo2, temperature).total()
}

/// Score a stored reading.
pub fn score_reading(reading: &Reading) -> u8 {
    score(reading.heart_rate, reading.spo2, reading.temperature)
}

impl RiskTier {
    /// Tier for a total score: HIGH from 7, MEDIUM for 5-6, LOW below.
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            RiskTier::High
        } else if score >= MEDIUM_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Whether downstream display should raise the ICU escalation signal.
    pub fn escalates(self) -> bool {
        self == RiskTier::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn heart_rate_boundaries() {
        for (hr, expected) in [
            (0, 3),
            (-5, 3),
            (40, 3),
            (41, 1),
            (50, 1),
            (51, 0),
            (75, 0),
            (90, 0),
            (91, 1),
            (110, 1),
            (111, 2),
            (130, 2),
            (131, 3),
            (180, 3),
        ] {
            assert_eq!(heart_rate_points(hr), expected, "heart rate {hr}");
        }
    }

    #[test]
    fn spo2_boundaries() {
        for (spo2, expected) in [
            (-1, 3),
            (85, 3),
            (91, 3),
            (92, 2),
            (93, 2),
            (94, 1),
            (95, 1),
            (96, 0),
            (100, 0),
        ] {
            assert_eq!(spo2_points(spo2), expected, "spo2 {spo2}");
        }
    }

    #[test]
    fn temperature_boundaries() {
        for (temp, expected) in [
            (34.0, 3),
            (35.0, 3),
            (35.1, 1),
            (36.0, 1),
            (36.1, 0),
            (36.8, 0),
            (38.0, 0),
            (38.1, 1),
            (39.0, 1),
            (39.1, 2),
            (41.0, 2),
        ] {
            assert_eq!(temperature_points(temp), expected, "temperature {temp}");
        }
    }

    #[test]
    fn temperature_between_band_edges_follows_chain() {
        assert_eq!(temperature_points(39.05), 1);
        assert_eq!(temperature_points(36.05), 0);
        assert_eq!(temperature_points(35.05), 1);
        assert_eq!(temperature_points(f64::NAN), 0);
    }

    #[test]
    fn critical_scenario_scores_eight() {
        let b = breakdown(180, 90, 39.5);
        assert_eq!(
            b,
            ScoreBreakdown {
                heart_rate: 3,
                spo2: 3,
                temperature: 2
            }
        );
        assert_eq!(score(180, 90, 39.5), 8);
        assert_eq!(RiskTier::from_score(8), RiskTier::High);
        assert!(RiskTier::from_score(8).escalates());
    }

    #[test]
    fn normal_vitals_score_zero() {
        assert_eq!(score(75, 98, 36.8), 0);
        assert_eq!(RiskTier::from_score(0), RiskTier::Low);
        assert!(!RiskTier::Low.escalates());
    }

    #[test]
    fn tier_steps() {
        for s in 0..=4 {
            assert_eq!(RiskTier::from_score(s), RiskTier::Low);
        }
        for s in 5..=6 {
            assert_eq!(RiskTier::from_score(s), RiskTier::Medium);
        }
        for s in 7..=MAX_SCORE {
            assert_eq!(RiskTier::from_score(s), RiskTier::High);
        }
        assert!(!RiskTier::Medium.escalates());
    }

    #[test]
    fn reading_scores_like_raw_values() {
        use crate::models::PatientId;
        let r = Reading::new(
            PatientId(1),
            chrono::Local::now().naive_local(),
            120,
            93,
            35.5,
        );
        assert_eq!(score_reading(&r), 2 + 2 + 1);
    }

    #[test]
    fn worst_case_hits_max() {
        assert_eq!(score(30, 80, 34.0), MAX_SCORE);
    }

    proptest! {
        #[test]
        fn score_is_sum_of_bounded_parts(
            hr in any::<i32>(),
            spo2 in any::<i32>(),
            temp in -50.0f64..60.0,
        ) {
            let b = breakdown(hr, spo2, temp);
            prop_assert!(b.heart_rate <= 3 && b.spo2 <= 3 && b.temperature <= 3);
            prop_assert_eq!(score(hr, spo2, temp), b.heart_rate + b.spo2 + b.temperature);
            prop_assert!(score(hr, spo2, temp) <= MAX_SCORE);
        }

        #[test]
        fn tier_is_monotonic(a in 0u8..=MAX_SCORE, b in 0u8..=MAX_SCORE) {
            if a <= b {
                prop_assert!(RiskTier::from_score(a) <= RiskTier::from_score(b));
            }
        }
    }
}
