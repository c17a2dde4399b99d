//! Core game types and identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Strikes allowed before a session ends
pub const MAX_STRIKES: u8 = 5;

/// Feedback message for an accepted guess
pub const SUCCESS_FEEDBACK: &str = "+1";

/// Feedback message for a duplicate guess
pub const DUPLICATE_FEEDBACK: &str = "Already listed!";

/// Fallback rejection reason when the judge supplied none
pub const GENERIC_REJECTION: &str = "Invalid";

/// Rejection reason for guesses that are too generic for the category
pub const TOO_VAGUE: &str = "Too vague";

/// Rejection reason used when the judge could not be reached
pub const COULD_NOT_VERIFY: &str = "Could not verify";

/// Unique identifier for game sessions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interface language for a session, forwarded to the judge as a locale hint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Sv,
}

impl Language {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" => Some(Language::En),
            "sv" => Some(Language::Sv),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Sv => "sv",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session status enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Active,
    Ended,
}

/// One playthrough: category selection to termination
///
/// Mutated exclusively by the session state machine; once `status` is
/// `Ended` the record is immutable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub category: String,
    pub language: Language,
    /// Canonical display forms, most-recent-first, unique case-insensitively
    pub accepted_items: Vec<String>,
    pub score: u32,
    pub strikes: u8,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
}

/// Judge decision for a single (category, guess) pair
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessVerdict {
    /// The guess is factually a member of the category
    pub is_member: bool,
    /// The guess is precise enough, not an umbrella term
    pub is_specific: bool,
    /// Judge-normalized display form of the guess
    pub canonical_form: String,
    /// Present when the guess is rejected
    pub rejection_reason: Option<String>,
}

impl GuessVerdict {
    /// Whether the guess earns a point
    pub fn accepted(&self) -> bool {
        self.is_member && self.is_specific
    }

    /// Default-reject verdict used when the judge cannot be reached
    pub fn unverified(guess: &str) -> Self {
        Self {
            is_member: false,
            is_specific: false,
            canonical_form: guess.to_string(),
            rejection_reason: Some(COULD_NOT_VERIFY.to_string()),
        }
    }
}

/// Feedback classification surfaced to the player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    Success,
    Error,
    Info,
}

/// Player-facing feedback for one submission
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Info, message: message.into() }
    }
}

/// Result of one guess-submission cycle
#[derive(Clone, Debug, PartialEq)]
pub enum GuessOutcome {
    /// Canonical form added to the list, score incremented
    Accepted { canonical: String, score: u32 },
    /// Guess matched an item already in the accepted list
    Duplicate { canonical: String },
    /// Judge rejected the guess; a strike was recorded
    Struck { reason: String, strikes: u8, ending: bool },
    /// Submission was dropped without touching session state
    Ignored(IgnoredReason),
}

/// Why a submission was dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoredReason {
    /// Empty or whitespace-only input
    EmptyInput,
    /// A judge call for this session is still outstanding
    GuessInFlight,
    /// The session has ended or its end is already scheduled
    SessionOver,
}

impl GuessOutcome {
    /// Player-facing feedback for this outcome, if any
    pub fn feedback(&self) -> Option<Feedback> {
        match self {
            GuessOutcome::Accepted { .. } => Some(Feedback::success(SUCCESS_FEEDBACK)),
            GuessOutcome::Duplicate { .. } => Some(Feedback::info(DUPLICATE_FEEDBACK)),
            GuessOutcome::Struck { reason, .. } => Some(Feedback::error(reason.clone())),
            GuessOutcome::Ignored(_) => None,
        }
    }
}
