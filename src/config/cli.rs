use crate::config::toml_config::TomlConfig;
use crate::domain::model::{
    MAX_CYCLE_LENGTH, MAX_PERIOD_DURATION, MIN_CYCLE_LENGTH, MIN_PERIOD_DURATION,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Period tracker and Shettles-method gender predictor.
#[derive(Debug, Clone, Parser)]
#[command(name = "fempredict", version)]
#[command(about = "Period tracker & pregnancy gender predictor (Shettles method)")]
pub struct CliConfig {
    /// Path to the TOML configuration file (optional)
    #[arg(short, long, global = true, default_value = "fempredict.toml")]
    pub config: PathBuf,

    /// Override the session file from the config
    #[arg(long, global = true)]
    pub session_file: Option<String>,

    /// Output format
    #[arg(long, global = true, value_parser = ["text", "json", "csv"])]
    pub format: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Calculate next period, fertile window, ovulation date and safe days
    Cycle(CycleArgs),
    /// Predict the likely gender from the intercourse date
    Gender(GenderArgs),
    /// Show the ovulation date stored in the session
    Status,
    /// Forget the stored ovulation date
    Reset,
    /// Run an interactive session on the console
    Interactive,
}

#[derive(Debug, Clone, Args)]
pub struct CycleArgs {
    /// Start date of the last period (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Average cycle length in days
    #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_CYCLE_LENGTH as i64..=MAX_CYCLE_LENGTH as i64))]
    pub cycle_length: Option<u32>,

    /// Period duration in days
    #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_PERIOD_DURATION as i64..=MAX_PERIOD_DURATION as i64))]
    pub period_duration: Option<u32>,
}

#[derive(Debug, Clone, Args)]
pub struct GenderArgs {
    /// Date of intercourse (YYYY-MM-DD)
    #[arg(long)]
    pub intercourse: String,
}

impl CliConfig {
    /// 命令列參數覆蓋設定檔
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(session_file) = &self.session_file {
            config.session.file = session_file.clone();
            tracing::debug!("Session file overridden to: {}", session_file);
        }
        if let Some(format) = &self.format {
            config.output.format = format.clone();
            tracing::debug!("Output format overridden to: {}", format);
        }
    }
}
