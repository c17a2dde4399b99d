//! JSON-file history store
//!
//! Persists finished sessions to a single JSON file, most-recent-first. The
//! engine only appends during gameplay; `list` exists for front ends that
//! show past games.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::EngineResult;
use crate::traits::HistoryStore;
use crate::types::Session;

/// File-backed session history
#[derive(Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    /// Store history at the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_records(&self) -> EngineResult<Vec<Session>> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn append(&self, session: &Session) -> EngineResult<()> {
        let mut records = self.read_records().await?;
        records.insert(0, session.clone());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let contents = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, contents).await?;

        debug!(path = %self.path.display(), total = records.len(), "session appended to history");
        Ok(())
    }

    async fn list(&self) -> EngineResult<Vec<Session>> {
        self.read_records().await
    }
}
