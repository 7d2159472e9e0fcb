use crate::core::cycle;
use crate::core::gender::predict_gender;
use crate::core::{CycleParameters, CycleResult, GenderPrediction, Result, SessionState, SessionStore};
use chrono::NaiveDate;

/// Caller-side state machine: `NoOvulationDate -> OvulationDateKnown`.
///
/// A successful cycle calculation sets (or overwrites) the ovulation date. Failed
/// operations leave the state exactly as it was. Nothing clears it except [`Session::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: SessionState) -> Self {
        Self { state }
    }

    /// 從 store 載入，沒有資料時為空 session
    pub async fn load(store: &dyn SessionStore) -> Result<Self> {
        let state = store.load().await?;
        Ok(Self::from_state(state))
    }

    pub async fn save(&self, store: &dyn SessionStore) -> Result<()> {
        store.save(&self.state).await
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn ovulation_date(&self) -> Option<NaiveDate> {
        self.state.ovulation_date
    }

    pub fn is_ready(&self) -> bool {
        self.state.ovulation_date.is_some()
    }

    pub fn record_cycle(&mut self, params: &CycleParameters) -> Result<CycleResult> {
        let result = cycle::calculate(params)?;

        if let Some(previous) = self.state.ovulation_date.replace(result.ovulation_date) {
            tracing::info!(
                "Ovulation date updated: {} -> {}",
                previous,
                result.ovulation_date
            );
        } else {
            tracing::info!("Ovulation date recorded: {}", result.ovulation_date);
        }

        Ok(result)
    }

    pub fn predict(&self, intercourse_date: NaiveDate) -> Result<GenderPrediction> {
        if !self.is_ready() {
            tracing::warn!("Gender prediction requested before any cycle calculation");
        }
        predict_gender(self.state.ovulation_date, intercourse_date)
    }

    pub fn reset(&mut self) {
        self.state = SessionState::default();
    }
}
