//! Hand-rolled collaborator doubles for driving full game flows

#![allow(dead_code)] // Test utilities may not all be used currently

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use engine::{EngineResult, GuessVerdict, HistoryStore, Language, SemanticJudge, Session};

/// Judge double that replays a scripted sequence of verdicts
///
/// When the script runs out it behaves like an unreachable judge and
/// returns the default-reject verdict.
pub struct ScriptedJudge {
    verdicts: Mutex<VecDeque<GuessVerdict>>,
    delay: Duration,
}

impl ScriptedJudge {
    pub fn new(verdicts: Vec<GuessVerdict>) -> Self {
        Self {
            verdicts: Mutex::new(verdicts.into()),
            delay: Duration::ZERO,
        }
    }

    /// Make every judge call take this long to resolve
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl SemanticJudge for ScriptedJudge {
    async fn judge_guess(&self, _category: &str, guess: &str, _locale: Language) -> GuessVerdict {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.verdicts
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| GuessVerdict::unverified(guess))
    }

    async fn suggest_categories(&self, _locales: &[String]) -> Vec<String> {
        vec!["Fruits".to_string()]
    }
}

/// In-memory history store recording appended sessions, most-recent-first
#[derive(Default)]
pub struct MemoryHistory {
    records: Arc<Mutex<Vec<Session>>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the record list, usable after the store has been moved
    /// into an orchestrator
    pub fn records_handle(&self) -> Arc<Mutex<Vec<Session>>> {
        Arc::clone(&self.records)
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn append(&self, session: &Session) -> EngineResult<()> {
        self.records.lock().await.insert(0, session.clone());
        Ok(())
    }

    async fn list(&self) -> EngineResult<Vec<Session>> {
        Ok(self.records.lock().await.clone())
    }
}
