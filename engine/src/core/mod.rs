//! Core game logic: guess normalization and the session state machine

pub mod normalizer;
pub mod session;

pub use normalizer::canonical_key;
pub use session::{SessionEvent, Transition};
