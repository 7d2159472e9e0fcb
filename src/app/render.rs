use crate::core::{ConfigProvider, CycleResult, GenderPrediction, SessionState};
use crate::utils::error::{CalcError, Result};
use chrono::NaiveDate;
use std::fmt::Write;
use std::str::FromStr;

pub const CLOSING_REMARKS: &str =
    "Based on biological data and mathematical estimations.\nAccuracy levels are 75% to 80%.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(CalcError::ConfigValidationError {
                field: "output.format".to_string(),
                message: format!("Unsupported format: {}", other),
            }),
        }
    }
}

/// Turns core results into text, JSON or CSV. Dates in text output use the
/// configured display format; JSON and CSV always carry ISO dates.
#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    date_format: String,
}

impl Renderer {
    pub fn new(format: OutputFormat, date_format: impl Into<String>) -> Self {
        Self {
            format,
            date_format: date_format.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(
            config.output_format().parse()?,
            config.date_format(),
        ))
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// chrono reports time or zone specifiers on a bare date as `fmt::Error`.
    fn date(&self, date: NaiveDate) -> Result<String> {
        format_date(date, &self.date_format)
    }

    pub fn cycle(&self, result: &CycleResult) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(format!(
                "Safe Days: {} to {}\nEstimated Ovulation Date: {}\nFertile Window: {} to {}\nNext Period: {}",
                self.date(result.safe_days_start)?,
                self.date(result.safe_days_end)?,
                self.date(result.ovulation_date)?,
                self.date(result.fertile_start)?,
                self.date(result.fertile_end)?,
                self.date(result.next_period)?,
            )),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Csv => write_csv(
                ["field", "date"],
                [
                    ("safe_days_start", result.safe_days_start.to_string()),
                    ("safe_days_end", result.safe_days_end.to_string()),
                    ("ovulation_date", result.ovulation_date.to_string()),
                    ("fertile_start", result.fertile_start.to_string()),
                    ("fertile_end", result.fertile_end.to_string()),
                    ("next_period", result.next_period.to_string()),
                ],
            ),
        }
    }

    pub fn prediction(&self, prediction: &GenderPrediction) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(match prediction.accuracy_percent {
                Some(accuracy) => format!(
                    "{} (estimated accuracy {}%)",
                    prediction.estimate.message(),
                    accuracy
                ),
                None => prediction.estimate.message().to_string(),
            }),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(prediction)?),
            OutputFormat::Csv => write_csv(
                ["field", "value"],
                [
                    ("estimate", prediction.estimate.to_string()),
                    ("ovulation_date", prediction.ovulation_date.to_string()),
                    ("intercourse_date", prediction.intercourse_date.to_string()),
                    ("days_difference", prediction.days_difference.to_string()),
                    (
                        "accuracy_percent",
                        prediction
                            .accuracy_percent
                            .map(|a| a.to_string())
                            .unwrap_or_default(),
                    ),
                ],
            ),
        }
    }

    pub fn status(&self, state: &SessionState) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(match state.ovulation_date {
                Some(date) => format!("Stored ovulation date: {}", self.date(date)?),
                None => "No ovulation date calculated yet.".to_string(),
            }),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(state)?),
            OutputFormat::Csv => write_csv(
                ["field", "date"],
                [(
                    "ovulation_date",
                    state
                        .ovulation_date
                        .map(|d| d.to_string())
                        .unwrap_or_default(),
                )],
            ),
        }
    }
}

pub fn format_date(date: NaiveDate, date_format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(date_format)).map_err(|_| CalcError::ConfigValidationError {
        field: "output.date_format".to_string(),
        message: format!("'{}' cannot be applied to a calendar date", date_format),
    })?;
    Ok(out)
}

fn write_csv<const N: usize>(header: [&str; 2], rows: [(&str, String); N]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for (field, value) in &rows {
        writer.write_record([*field, value.as_str()])?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| CalcError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&data).trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cycle::compute_cycle;
    use crate::core::gender::predict_gender;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reference_cycle() -> CycleResult {
        compute_cycle(date(2024, 1, 1), 28, 5).unwrap()
    }

    #[test]
    fn test_text_cycle_report() {
        let renderer = Renderer::new(OutputFormat::Text, "%d-%m-%Y");
        let text = renderer.cycle(&reference_cycle()).unwrap();

        assert_eq!(
            text,
            "Safe Days: 06-01-2024 to 09-01-2024\n\
             Estimated Ovulation Date: 15-01-2024\n\
             Fertile Window: 10-01-2024 to 16-01-2024\n\
             Next Period: 29-01-2024"
        );
    }

    #[test]
    fn test_csv_cycle_report() {
        let renderer = Renderer::new(OutputFormat::Csv, "%d-%m-%Y");
        let csv = renderer.cycle(&reference_cycle()).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "field,date");
        assert!(lines.contains(&"ovulation_date,2024-01-15"));
        assert!(lines.contains(&"next_period,2024-01-29"));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_json_prediction() {
        let renderer = Renderer::new(OutputFormat::Json, "%d-%m-%Y");
        let prediction = predict_gender(Some(date(2024, 3, 15)), date(2024, 3, 10)).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&renderer.prediction(&prediction).unwrap()).unwrap();

        assert_eq!(json["estimate"], "girl_likely");
        assert_eq!(json["days_difference"], 5);
        assert_eq!(json["accuracy_percent"], 80);
    }

    #[test]
    fn test_text_prediction_messages() {
        let renderer = Renderer::new(OutputFormat::Text, "%d-%m-%Y");

        let boy = predict_gender(Some(date(2024, 3, 15)), date(2024, 3, 15)).unwrap();
        assert_eq!(
            renderer.prediction(&boy).unwrap(),
            "You are more likely to conceive a boy. (estimated accuracy 75%)"
        );

        let outside = predict_gender(Some(date(2024, 3, 15)), date(2024, 3, 16)).unwrap();
        assert_eq!(
            renderer.prediction(&outside).unwrap(),
            "Intercourse timing is outside the estimated fertile window."
        );
    }

    #[test]
    fn test_status() {
        let renderer = Renderer::new(OutputFormat::Text, "%d-%m-%Y");
        assert_eq!(
            renderer.status(&SessionState::default()).unwrap(),
            "No ovulation date calculated yet."
        );
        let known = SessionState {
            ovulation_date: Some(date(2024, 1, 15)),
        };
        assert_eq!(
            renderer.status(&known).unwrap(),
            "Stored ovulation date: 15-01-2024"
        );
    }

    #[test]
    fn test_time_specifier_is_an_error_not_a_panic() {
        let renderer = Renderer::new(OutputFormat::Text, "%H:%M");
        let err = renderer.cycle(&reference_cycle()).unwrap_err();
        assert!(matches!(err, CalcError::ConfigValidationError { .. }));

        let known = SessionState {
            ovulation_date: Some(date(2024, 1, 15)),
        };
        assert!(renderer.status(&known).is_err());
    }

    #[test]
    fn test_unknown_format() {
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
    }
}
