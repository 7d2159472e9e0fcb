use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Invalid input for '{field}' ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No ovulation date has been calculated in this session")]
    MissingOvulationDate,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    State,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::InvalidInput { .. } => ErrorCategory::Input,
            CalcError::MissingOvulationDate => ErrorCategory::State,
            CalcError::ConfigError { .. } | CalcError::ConfigValidationError { .. } => {
                ErrorCategory::Configuration
            }
            CalcError::IoError(_) | CalcError::SerializationError(_) | CalcError::CsvError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 只是提醒使用者先計算週期，不算失敗
            CalcError::MissingOvulationDate => ErrorSeverity::Low,
            CalcError::SerializationError(_) => ErrorSeverity::Medium,
            CalcError::InvalidInput { .. }
            | CalcError::ConfigError { .. }
            | CalcError::ConfigValidationError { .. } => ErrorSeverity::High,
            CalcError::IoError(_) | CalcError::CsvError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CalcError::InvalidInput { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
            CalcError::MissingOvulationDate => {
                "Please calculate your cycle first to get the ovulation date.".to_string()
            }
            CalcError::IoError(e) => format!("Could not read or write data: {}", e),
            CalcError::SerializationError(_) => "The stored session could not be read.".to_string(),
            CalcError::CsvError(e) => format!("Could not write CSV output: {}", e),
            CalcError::ConfigError { message } => format!("Configuration problem: {}", message),
            CalcError::ConfigValidationError { field, message } => {
                format!("Configuration value '{}' is not valid: {}", field, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => {
                "Use YYYY-MM-DD dates, a cycle length of 20-45 days and a period duration of 1-10 days"
            }
            CalcError::MissingOvulationDate => {
                "Run `fempredict cycle --start <date>` before predicting"
            }
            CalcError::IoError(_) => "Check that the session file path is writable",
            CalcError::SerializationError(_) => "Run `fempredict reset` to start a fresh session",
            CalcError::CsvError(_) => "Try `--format text` or `--format json`",
            CalcError::ConfigError { .. } | CalcError::ConfigValidationError { .. } => {
                "Check the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
