//! Session orchestration
//!
//! Sequences one guess-submission cycle: local input rejection, duplicate
//! short-circuit, judge call, verdict application, and end-of-session
//! handling. The judge call is the only suspension point, and at most one
//! guess is in flight per session at a time.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::core::normalizer::canonical_key;
use crate::core::session::{SessionEvent, Transition};
use crate::error::{EngineError, EngineResult};
use crate::traits::{HistoryStore, SemanticJudge};
use crate::types::{GuessOutcome, IgnoredReason, Language, Session, SessionId, SessionStatus};

/// Delay between the final strike's feedback and session finalization
pub const END_OF_GAME_DELAY: Duration = Duration::from_millis(1000);

struct GameState {
    session: Session,
    /// A judge call is outstanding; new submissions are ignored meanwhile
    in_flight: bool,
    /// The strike-limit end transition has been scheduled
    end_scheduled: bool,
}

/// Orchestrates a single game session against injected collaborators
pub struct GameOrchestrator<J, H>
where
    J: SemanticJudge,
    H: HistoryStore + 'static,
{
    judge: J,
    history: Arc<H>,
    state: Arc<Mutex<GameState>>,
    end_delay: Duration,
    end_tx: mpsc::Sender<Session>,
}

impl<J, H> GameOrchestrator<J, H>
where
    J: SemanticJudge,
    H: HistoryStore + 'static,
{
    /// Create an orchestrator with a fresh session for the given category
    ///
    /// # Returns
    /// The orchestrator and a receiver that delivers the finalized session
    /// record exactly once, whichever way the game ends.
    pub fn new(
        category: &str,
        language: Language,
        judge: J,
        history: H,
    ) -> EngineResult<(Self, mpsc::Receiver<Session>)> {
        let category = category.trim();
        if category.is_empty() {
            return Err(EngineError::InvalidCategory {
                reason: "category must not be empty".to_string(),
            });
        }

        let session = Session::new(category, language);
        info!(session_id = %session.id, category, "session started");

        let (end_tx, end_rx) = mpsc::channel(1);
        let orchestrator = Self {
            judge,
            history: Arc::new(history),
            state: Arc::new(Mutex::new(GameState {
                session,
                in_flight: false,
                end_scheduled: false,
            })),
            end_delay: END_OF_GAME_DELAY,
            end_tx,
        };
        Ok((orchestrator, end_rx))
    }

    /// Override the end-of-game delay (tests use a short one)
    pub fn with_end_delay(mut self, delay: Duration) -> Self {
        self.end_delay = delay;
        self
    }

    /// Snapshot of the current session record
    pub async fn session(&self) -> Session {
        self.state.lock().await.session.clone()
    }

    /// Whether a judge call is currently outstanding
    pub async fn is_checking(&self) -> bool {
        self.state.lock().await.in_flight
    }

    /// Run one guess-submission cycle
    ///
    /// Empty input, submissions while a judge call is outstanding, and
    /// submissions after the session has (or is about to have) ended are
    /// ignored without a judge call or state mutation.
    pub async fn submit_guess(&self, raw: &str) -> GuessOutcome {
        let guess = raw.trim();
        if guess.is_empty() {
            return GuessOutcome::Ignored(IgnoredReason::EmptyInput);
        }

        let (category, locale, session_id) = {
            let mut state = self.state.lock().await;
            if state.session.status == SessionStatus::Ended || state.end_scheduled {
                return GuessOutcome::Ignored(IgnoredReason::SessionOver);
            }
            if state.in_flight {
                return GuessOutcome::Ignored(IgnoredReason::GuessInFlight);
            }

            // Raw-text duplicate short-circuit: no judge call needed
            let key = canonical_key(guess);
            if let Some(existing) = state
                .session
                .accepted_items
                .iter()
                .find(|item| canonical_key(item) == key)
            {
                debug!(%guess, "duplicate short-circuit");
                return GuessOutcome::Duplicate { canonical: existing.clone() };
            }

            state.in_flight = true;
            (
                state.session.category.clone(),
                state.session.language,
                state.session.id,
            )
        };

        let verdict = self.judge.judge_guess(&category, guess, locale).await;

        let mut state = self.state.lock().await;
        state.in_flight = false;

        // The session may have ended (give-up) while the judge call was
        // outstanding; a late verdict must not mutate the ended session.
        if state.session.status == SessionStatus::Ended {
            debug!(session_id = %session_id, "discarding verdict for ended session");
            return GuessOutcome::Ignored(IgnoredReason::SessionOver);
        }

        match state.session.apply(SessionEvent::Verdict(verdict)) {
            Transition::Accepted { canonical } => {
                let score = state.session.score;
                info!(%canonical, score, "guess accepted");
                GuessOutcome::Accepted { canonical, score }
            }
            Transition::DuplicateCanonical { canonical } => {
                GuessOutcome::Duplicate { canonical }
            }
            Transition::Struck { reason, strikes, fatal } => {
                info!(%reason, strikes, "guess rejected");
                if fatal {
                    state.end_scheduled = true;
                    self.schedule_end(session_id);
                }
                GuessOutcome::Struck { reason, strikes, ending: fatal }
            }
            Transition::Ended | Transition::Ignored => {
                GuessOutcome::Ignored(IgnoredReason::SessionOver)
            }
        }
    }

    /// End the session immediately, preserving score, strikes, and items
    ///
    /// Returns the finalized record, or None when the session had already
    /// ended.
    pub async fn give_up(&self) -> Option<Session> {
        let record = {
            let mut state = self.state.lock().await;
            finalize(&mut state)?
        };
        persist(self.history.as_ref(), &record).await;
        let _ = self.end_tx.send(record.clone()).await;
        Some(record)
    }

    /// Schedule the strike-limit end transition after the feedback delay
    ///
    /// The task re-checks session identity and status before finalizing, so
    /// a give-up racing the delay cannot resurrect a finished session.
    fn schedule_end(&self, session_id: SessionId) {
        let state = Arc::clone(&self.state);
        let history = Arc::clone(&self.history);
        let end_tx = self.end_tx.clone();
        let delay = self.end_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let record = {
                let mut guard = state.lock().await;
                if guard.session.id != session_id {
                    return;
                }
                match finalize(&mut guard) {
                    Some(record) => record,
                    None => return,
                }
            };
            persist(history.as_ref(), &record).await;
            let _ = end_tx.send(record).await;
        });
    }
}

/// Transition the session to `Ended` and return the immutable record
fn finalize(state: &mut GameState) -> Option<Session> {
    if state.session.end() {
        info!(
            session_id = %state.session.id,
            score = state.session.score,
            strikes = state.session.strikes,
            "session ended"
        );
        Some(state.session.clone())
    } else {
        None
    }
}

/// Hand a finalized session to the history collaborator
///
/// Zero-score sessions are not persisted. Persistence failures are logged
/// and swallowed; the game outcome does not depend on the store.
async fn persist<H: HistoryStore>(history: &H, record: &Session) {
    if record.score == 0 {
        debug!(session_id = %record.id, "zero-score session not persisted");
        return;
    }
    if let Err(e) = history.append(record).await {
        warn!(error = %e, session_id = %record.id, "failed to persist session history");
    }
}
