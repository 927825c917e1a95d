use serde::{Deserialize, Serialize};

use crate::db::RepositoryError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The serde name of every variant is the same string as `as_str`.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = RepositoryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(RepositoryError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// Coarse early-warning classification. Declared low to high so `Ord` follows severity.
    RiskTier {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
    }
);

str_enum!(
    /// Direction of one parameter between two consecutive readings.
    Trend {
        Up => "UP",
        Down => "DOWN",
        Stable => "STABLE",
    }
);

str_enum!(
    /// The three measured vitals. Serde names double as payload map keys.
    VitalParameter {
        HeartRate => "heartRate",
        Spo2 => "spo2",
        Temperature => "temperature",
    }
);

str_enum!(
    /// Bedside status flag shown next to each vital.
    VitalStatus {
        Ok => "OK",
        High => "HIGH",
        Low => "LOW",
    }
);

str_enum!(Gender {
    Male => "Male",
    Female => "Female",
    Other => "Other",
});

impl VitalParameter {
    pub const ALL: [VitalParameter; 3] = [
        VitalParameter::HeartRate,
        VitalParameter::Spo2,
        VitalParameter::Temperature,
    ];

    /// Display unit for this parameter.
    pub fn unit(self) -> &'static str {
        match self {
            VitalParameter::HeartRate => "bpm",
            VitalParameter::Spo2 => "%",
            VitalParameter::Temperature => "°C",
        }
    }
}
