use crate::utils::error::Result;
use crate::utils::validation::{parse_date, validate_range};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_CYCLE_LENGTH: u32 = 20;
pub const MAX_CYCLE_LENGTH: u32 = 45;
pub const MIN_PERIOD_DURATION: u32 = 1;
pub const MAX_PERIOD_DURATION: u32 = 10;

/// 表單預設值
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;
pub const DEFAULT_PERIOD_DURATION: u32 = 5;

pub const BOY_ACCURACY_PERCENT: u8 = 75;
pub const GIRL_ACCURACY_PERCENT: u8 = 80;

/// Inputs of one cycle calculation. Only constructible through [`CycleParameters::new`],
/// so every instance is within the documented ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleParameters {
    period_start: NaiveDate,
    cycle_length: u32,
    period_duration: u32,
}

impl CycleParameters {
    pub fn new(period_start: NaiveDate, cycle_length: u32, period_duration: u32) -> Result<Self> {
        validate_range("cycle_length", cycle_length, MIN_CYCLE_LENGTH, MAX_CYCLE_LENGTH)?;
        validate_range(
            "period_duration",
            period_duration,
            MIN_PERIOD_DURATION,
            MAX_PERIOD_DURATION,
        )?;

        Ok(Self {
            period_start,
            cycle_length,
            period_duration,
        })
    }

    /// Parses `period_start` as `YYYY-MM-DD` and validates the numeric ranges.
    pub fn parse(period_start: &str, cycle_length: u32, period_duration: u32) -> Result<Self> {
        let start = parse_date("period_start", period_start)?;
        Self::new(start, cycle_length, period_duration)
    }

    pub fn period_start(&self) -> NaiveDate {
        self.period_start
    }

    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }

    pub fn period_duration(&self) -> u32 {
        self.period_duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleResult {
    pub next_period: NaiveDate,
    pub safe_days_start: NaiveDate,
    pub safe_days_end: NaiveDate,
    pub fertile_start: NaiveDate,
    pub fertile_end: NaiveDate,
    pub ovulation_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderEstimate {
    BoyLikely,
    GirlLikely,
    OutOfWindow,
}

impl GenderEstimate {
    pub fn message(&self) -> &'static str {
        match self {
            GenderEstimate::BoyLikely => "You are more likely to conceive a boy.",
            GenderEstimate::GirlLikely => "You are more likely to conceive a girl.",
            GenderEstimate::OutOfWindow => {
                "Intercourse timing is outside the estimated fertile window."
            }
        }
    }

    /// Display-only figure; never used in the classification.
    pub fn accuracy_percent(&self) -> Option<u8> {
        match self {
            GenderEstimate::BoyLikely => Some(BOY_ACCURACY_PERCENT),
            GenderEstimate::GirlLikely => Some(GIRL_ACCURACY_PERCENT),
            GenderEstimate::OutOfWindow => None,
        }
    }
}

impl fmt::Display for GenderEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GenderEstimate::BoyLikely => "boy-likely",
            GenderEstimate::GirlLikely => "girl-likely",
            GenderEstimate::OutOfWindow => "out-of-window",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderPrediction {
    pub estimate: GenderEstimate,
    pub ovulation_date: NaiveDate,
    pub intercourse_date: NaiveDate,
    /// ovulation_date - intercourse_date, may be negative
    pub days_difference: i64,
    pub accuracy_percent: Option<u8>,
}

/// Per-session slot for the last computed ovulation date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub ovulation_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CalcError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_cycle_parameters_ranges() {
        let start = date(2024, 1, 1);
        assert!(CycleParameters::new(start, 20, 1).is_ok());
        assert!(CycleParameters::new(start, 45, 10).is_ok());

        for (cycle, duration) in [(19, 5), (46, 5), (28, 0), (28, 11)] {
            let err = CycleParameters::new(start, cycle, duration).unwrap_err();
            assert!(matches!(err, CalcError::InvalidInput { .. }));
        }
    }

    #[test]
    fn test_cycle_parameters_parse_rejects_bad_date() {
        let err = CycleParameters::parse("2024-13-01", 28, 5).unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "period_start"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_accuracy_figures() {
        assert_eq!(GenderEstimate::BoyLikely.accuracy_percent(), Some(75));
        assert_eq!(GenderEstimate::GirlLikely.accuracy_percent(), Some(80));
        assert_eq!(GenderEstimate::OutOfWindow.accuracy_percent(), None);
    }

    #[test]
    fn test_session_state_json() {
        let state = SessionState {
            ovulation_date: Some(date(2024, 1, 15)),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"ovulation_date":"2024-01-15"}"#);

        let empty: SessionState = serde_json::from_str(r#"{"ovulation_date":null}"#).unwrap();
        assert_eq!(empty, SessionState::default());
    }
}
