use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// How thirsty a species is. Every watering interval in the system
/// is derived from this classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaterNeed {
    Low,
    Medium,
    High,
}

impl WaterNeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Water need: {0} is not one of LOW, MEDIUM or HIGH")]
pub struct InvalidWaterNeedError(pub String);

impl FromStr for WaterNeed {
    type Err = InvalidWaterNeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(InvalidWaterNeedError(s.to_string())),
        }
    }
}

/// Days between two waterings
pub fn watering_interval(need: WaterNeed) -> i64 {
    match need {
        WaterNeed::High => 4,
        WaterNeed::Medium => 14,
        WaterNeed::Low => 30,
    }
}

/// Days a postponed watering is pushed back
pub fn postpone_interval(need: WaterNeed) -> i64 {
    match need {
        WaterNeed::High => 2,
        WaterNeed::Medium => 5,
        WaterNeed::Low => 10,
    }
}
