use crate::core::{SessionState, SessionStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keeps the session as a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<SessionState> {
        match tokio::fs::read(&self.path).await {
            Ok(data) => {
                let state = serde_json::from_slice(&data)?;
                tracing::debug!("Loaded session from {}", self.path.display());
                Ok(state)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No session at {}, starting empty", self.path.display());
                Ok(SessionState::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec_pretty(state)?;
        tokio::fs::write(&self.path, data).await?;
        tracing::debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, used in tests and by embedding callers.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    state: Arc<Mutex<SessionState>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<SessionState> {
        Ok(*self.state.lock().await)
    }

    async fn save(&self, state: &SessionState) -> Result<()> {
        *self.state.lock().await = *state;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.state.lock().await = SessionState::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CalcError;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn known_state() -> SessionState {
        SessionState {
            ovulation_date: NaiveDate::from_ymd_opt(2024, 1, 15),
        }
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("session.json"));

        assert_eq!(store.load().await.unwrap(), SessionState::default());
    }

    #[tokio::test]
    async fn test_file_store_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("nested/dir/session.json"));

        store.save(&known_state()).await.unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().await.unwrap(), known_state());

        store.clear().await.unwrap();
        assert!(!store.path().exists());
        // 重複清除不應出錯
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();

        let err = FileSessionStore::new(path).load().await.unwrap_err();
        assert!(matches!(err, CalcError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_memory_stores_are_isolated() {
        let first = MemorySessionStore::new();
        let second = MemorySessionStore::new();

        first.save(&known_state()).await.unwrap();
        assert_eq!(first.load().await.unwrap(), known_state());
        assert_eq!(second.load().await.unwrap(), SessionState::default());
    }
}
