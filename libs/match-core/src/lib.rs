//! Core library for the Japanese–Thai pair-matching game, shared by the
//! desktop shell.
//!
//! Provides:
//! - Entry data model and the built-in vocabulary/sentence tables
//! - Session configuration (count clamping, entry resolution)
//! - The match-engine state machine (selection, matching, clocks)
//! - Score presentation and the synthesized sound-effect tones

pub mod content;
pub mod engine;
pub mod error;
pub mod score;
pub mod session;
pub mod tone;
pub mod types;

pub use engine::{Cue, GameView, MatchEngine, Outcome, Phase, TapOutcome, TapResponse};
pub use error::{GameError, Result};
pub use score::{format_clock, percentage, MessageTier, ScoreSummary};
pub use session::{clamp_item_count, resolve_entries, MAX_ITEMS, MIN_ITEMS};
pub use types::{
    Entry, GameResult, GameSettings, GameType, MatchCard, SentenceEntry, Side, TimerOption,
    WordEntry,
};
