pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileSessionStore, MemorySessionStore};
pub use app::{Console, OutputFormat, Renderer};
pub use config::TomlConfig;
pub use crate::core::{
    cycle::compute_cycle, gender::predict_gender, session::Session, CycleParameters, CycleResult,
    GenderEstimate, GenderPrediction, SessionState,
};
pub use utils::error::{CalcError, Result};
