use crate::domain::model::SessionState;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where a session's ovulation date lives between two independent commands.
/// One store instance per session; stores never share state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// An absent session loads as the empty state.
    async fn load(&self) -> Result<SessionState>;
    async fn save(&self, state: &SessionState) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn default_cycle_length(&self) -> u32;
    fn default_period_duration(&self) -> u32;
    fn session_file(&self) -> &str;
    fn date_format(&self) -> &str;
    fn output_format(&self) -> &str;
}
