use crate::utils::error::{CalcError, Result};
use chrono::NaiveDate;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 使用者輸入的日期格式 (與表單相同)
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CalcError::invalid_input(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CalcError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(CalcError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("'{}' is not supported. Valid values: {}", value, allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn parse_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT).map_err(|e| {
        CalcError::invalid_input(field_name, value, format!("Expected YYYY-MM-DD: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("cycle_length", 20, 20, 45).is_ok());
        assert!(validate_range("cycle_length", 45, 20, 45).is_ok());
        assert!(validate_range("cycle_length", 19, 20, 45).is_err());
        assert!(validate_range("cycle_length", 46, 20, 45).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("period_start", "2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("period_start", "2023-02-29").is_err());
        assert!(parse_date("period_start", "01-01-2024").is_err());
        assert!(parse_date("period_start", "").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("output.format", "json", &["text", "json", "csv"]).is_ok());
        assert!(validate_one_of("output.format", "xml", &["text", "json", "csv"]).is_err());
    }
}
