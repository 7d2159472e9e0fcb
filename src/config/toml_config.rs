use crate::app::render::format_date;
use crate::core::ConfigProvider;
use crate::domain::model::{
    DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_DURATION, MAX_CYCLE_LENGTH, MAX_PERIOD_DURATION,
    MIN_CYCLE_LENGTH, MIN_PERIOD_DURATION,
};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_range, Validate};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const OUTPUT_FORMATS: &[&str] = &["text", "json", "csv"];
pub const LOG_FORMATS: &[&str] = &["compact", "json"];
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,
    #[serde(default = "default_period_duration")]
    pub period_duration: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            cycle_length: DEFAULT_CYCLE_LENGTH,
            period_duration: DEFAULT_PERIOD_DURATION,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output_format")]
    pub format: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            date_format: default_date_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
    pub level: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: None,
        }
    }
}

fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH
}
fn default_period_duration() -> u32 {
    DEFAULT_PERIOD_DURATION
}
fn default_session_file() -> String {
    ".fempredict/session.json".to_string()
}
fn default_output_format() -> String {
    "text".to_string()
}
fn default_date_format() -> String {
    "%d-%m-%Y".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用內建預設值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!("Loading configuration from {}", path.display());
            Self::from_file(path)
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CalcError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SESSION_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CalcError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_range(
            "defaults.cycle_length",
            self.defaults.cycle_length,
            MIN_CYCLE_LENGTH,
            MAX_CYCLE_LENGTH,
        )?;
        validate_range(
            "defaults.period_duration",
            self.defaults.period_duration,
            MIN_PERIOD_DURATION,
            MAX_PERIOD_DURATION,
        )?;
        validate_non_empty_string("session.file", &self.session.file)?;
        validate_one_of("output.format", &self.output.format, OUTPUT_FORMATS)?;
        validate_date_format("output.date_format", &self.output.date_format)?;
        validate_one_of("logging.format", &self.logging.format, LOG_FORMATS)?;
        if let Some(level) = &self.logging.level {
            validate_one_of("logging.level", level, LOG_LEVELS)?;
        }
        Ok(())
    }

    pub fn json_logging(&self) -> bool {
        self.logging.format == "json"
    }
}

/// The pattern must parse and must render a bare calendar date (no time or zone fields).
fn validate_date_format(field_name: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field_name, format)?;
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(CalcError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("'{}' is not a valid strftime pattern", format),
        });
    }

    let sample = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or_else(|| CalcError::ConfigError {
        message: "sample date out of range".to_string(),
    })?;
    format_date(sample, format).map_err(|_| CalcError::ConfigValidationError {
        field: field_name.to_string(),
        message: format!(
            "'{}' contains time or zone fields; only date fields are allowed",
            format
        ),
    })?;
    Ok(())
}

impl ConfigProvider for TomlConfig {
    fn default_cycle_length(&self) -> u32 {
        self.defaults.cycle_length
    }

    fn default_period_duration(&self) -> u32 {
        self.defaults.period_duration
    }

    fn session_file(&self) -> &str {
        &self.session.file
    }

    fn date_format(&self) -> &str {
        &self.output.date_format
    }

    fn output_format(&self) -> &str {
        &self.output.format
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
