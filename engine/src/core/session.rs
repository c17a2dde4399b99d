//! Session state machine
//!
//! A pure reducer over (session, event). It consumes resolved judge
//! verdicts and give-up events, owns score/strike/item bookkeeping, and
//! decides when the session ends. All fallibility lives at the judge
//! boundary, so the machine has no error channel of its own.

use chrono::Utc;

use crate::core::normalizer::canonical_key;
use crate::types::{
    GuessVerdict, Language, Session, SessionId, SessionStatus, GENERIC_REJECTION, MAX_STRIKES,
};

/// Event delivered to the session state machine
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// Resolved verdict for a submitted guess
    Verdict(GuessVerdict),
    /// Explicit player-initiated termination
    GiveUp,
}

/// Observable result of applying one event
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    /// Canonical form added to the list, score incremented
    Accepted { canonical: String },
    /// The judge-normalized form matched an existing item
    DuplicateCanonical { canonical: String },
    /// Strike recorded; `fatal` marks the strike that reaches the limit
    Struck { reason: String, strikes: u8, fatal: bool },
    /// Session moved to `Ended`
    Ended,
    /// Event delivered to a finished session; no state change
    Ignored,
}

impl Session {
    /// Create a fresh active session for a category
    pub fn new(category: impl Into<String>, language: Language) -> Self {
        Self {
            id: SessionId::new(),
            category: category.into(),
            language,
            accepted_items: Vec::new(),
            score: 0,
            strikes: 0,
            status: SessionStatus::Active,
            started_at: Utc::now(),
        }
    }

    /// Whether a comparison key matches any accepted item, case-insensitively
    pub fn contains_key(&self, key: &str) -> bool {
        self.accepted_items.iter().any(|item| canonical_key(item) == key)
    }

    /// Apply one event, returning the observable transition
    ///
    /// Total function: events delivered after the session has ended, or
    /// after the final strike while the end transition is pending, are
    /// ignored rather than rejected.
    pub fn apply(&mut self, event: SessionEvent) -> Transition {
        if self.status == SessionStatus::Ended {
            return Transition::Ignored;
        }

        match event {
            SessionEvent::Verdict(verdict) => {
                if self.strikes >= MAX_STRIKES {
                    return Transition::Ignored;
                }
                self.apply_verdict(verdict)
            }
            SessionEvent::GiveUp => {
                self.end();
                Transition::Ended
            }
        }
    }

    fn apply_verdict(&mut self, verdict: GuessVerdict) -> Transition {
        if verdict.accepted() {
            // Re-check duplication against the judge's canonical form: the
            // judge may normalize a raw guess onto an item already listed.
            let key = canonical_key(&verdict.canonical_form);
            if self.contains_key(&key) {
                return Transition::DuplicateCanonical { canonical: verdict.canonical_form };
            }

            self.accepted_items.insert(0, verdict.canonical_form.clone());
            self.score += 1;
            Transition::Accepted { canonical: verdict.canonical_form }
        } else {
            self.strikes += 1;
            let reason = verdict
                .rejection_reason
                .unwrap_or_else(|| GENERIC_REJECTION.to_string());
            Transition::Struck {
                reason,
                strikes: self.strikes,
                fatal: self.strikes >= MAX_STRIKES,
            }
        }
    }

    /// Transition `Active` -> `Ended`
    ///
    /// Returns true when the transition happened. The terminal state is
    /// entered at most once; later calls are no-ops.
    pub fn end(&mut self) -> bool {
        if self.status == SessionStatus::Active {
            self.status = SessionStatus::Ended;
            true
        } else {
            false
        }
    }
}
