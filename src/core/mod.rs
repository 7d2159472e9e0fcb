pub mod cycle;
pub mod gender;
pub mod session;

pub use crate::domain::model::{
    CycleParameters, CycleResult, GenderEstimate, GenderPrediction, SessionState,
};
pub use crate::domain::ports::{ConfigProvider, SessionStore};
pub use crate::utils::error::Result;
