//! Trait definitions with mockall annotations for testing
//!
//! Dependency-injection seams between the session orchestrator and its
//! external collaborators: the semantic judge and the history store.

use crate::error::EngineResult;
use crate::types::{GuessVerdict, Language, Session};

/// External semantic-judgment capability
///
/// Implementations must be total: any transport, timeout, or parse failure
/// is converted into a default-reject verdict at this boundary, so the
/// orchestrator never stalls on an unreachable judge and never awards a
/// point it could not verify.
#[mockall::automock]
#[async_trait::async_trait]
pub trait SemanticJudge: Send + Sync {
    /// Classify a guess against a category
    ///
    /// # Returns
    /// A resolved verdict, always. On any upstream failure the verdict is
    /// a reject carrying the "Could not verify" reason.
    async fn judge_guess(&self, category: &str, guess: &str, locale: Language) -> GuessVerdict;

    /// Produce a small batch of example categories
    ///
    /// Best-effort: returns a fixed built-in list when the upstream call
    /// fails or yields nothing.
    async fn suggest_categories(&self, locales: &[String]) -> Vec<String>;
}

/// Ordered persistence for finished sessions
///
/// The engine only appends during gameplay; listing exists for front ends
/// that show past games.
#[mockall::automock]
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append a finalized session record
    async fn append(&self, session: &Session) -> EngineResult<()>;

    /// List stored sessions, most-recent-first
    async fn list(&self) -> EngineResult<Vec<Session>>;
}
