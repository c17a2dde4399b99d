//! Category guessing game engine
//!
//! Core of a single-player word game: the player names members of a chosen
//! category and an external semantic judge decides whether each guess counts.
//! This crate owns guess normalization, the session state machine, and the
//! orchestration of one guess cycle; presentation front ends plug in through
//! the dependency-injection traits.

pub mod core;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use crate::core::normalizer::canonical_key;
pub use crate::core::session::{SessionEvent, Transition};
pub use error::{EngineError, EngineResult};
pub use orchestrator::{GameOrchestrator, END_OF_GAME_DELAY};
pub use services::*;
pub use traits::*;
pub use types::*;
