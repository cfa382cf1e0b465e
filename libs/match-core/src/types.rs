//! Core types for the pair-matching game.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Which content pool a session draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Word,
    Sentence,
}

impl Default for GameType {
    fn default() -> Self {
        Self::Word
    }
}

/// Countdown setting. Serialized as the bare second count; only the four
/// values the settings screen offers are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimerOption {
    Unlimited,
    ThirtySeconds,
    OneMinute,
    TwoMinutes,
}

impl Default for TimerOption {
    fn default() -> Self {
        Self::Unlimited
    }
}

impl TimerOption {
    /// Countdown length in seconds; zero means no timeout path.
    pub fn seconds(self) -> u32 {
        match self {
            Self::Unlimited => 0,
            Self::ThirtySeconds => 30,
            Self::OneMinute => 60,
            Self::TwoMinutes => 120,
        }
    }

    pub fn is_unlimited(self) -> bool {
        self == Self::Unlimited
    }
}

impl From<TimerOption> for u32 {
    fn from(timer: TimerOption) -> u32 {
        timer.seconds()
    }
}

impl TryFrom<u32> for TimerOption {
    type Error = GameError;

    fn try_from(value: u32) -> Result<Self, GameError> {
        match value {
            0 => Ok(Self::Unlimited),
            30 => Ok(Self::ThirtySeconds),
            60 => Ok(Self::OneMinute),
            120 => Ok(Self::TwoMinutes),
            other => Err(GameError::InvalidTimer(other)),
        }
    }
}

/// A vocabulary word. Immutable once created; `id` is unique across
/// built-in and user entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: String,
    pub japanese: String,
    pub reading: String,
    pub thai: String,
}

/// A full sentence, grouped under a category on the browse screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceEntry {
    pub id: String,
    pub japanese: String,
    pub reading: String,
    pub thai: String,
    pub category: String,
}

/// A word or sentence, discriminated by an explicit `kind` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Word(WordEntry),
    Sentence(SentenceEntry),
}

impl Entry {
    pub fn id(&self) -> &str {
        match self {
            Self::Word(w) => &w.id,
            Self::Sentence(s) => &s.id,
        }
    }

    pub fn japanese(&self) -> &str {
        match self {
            Self::Word(w) => &w.japanese,
            Self::Sentence(s) => &s.japanese,
        }
    }

    pub fn reading(&self) -> &str {
        match self {
            Self::Word(w) => &w.reading,
            Self::Sentence(s) => &s.reading,
        }
    }

    pub fn thai(&self) -> &str {
        match self {
            Self::Word(w) => &w.thai,
            Self::Sentence(s) => &s.thai,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Word(_) => None,
            Self::Sentence(s) => Some(&s.category),
        }
    }

    pub fn game_type(&self) -> GameType {
        match self {
            Self::Word(_) => GameType::Word,
            Self::Sentence(_) => GameType::Sentence,
        }
    }
}

/// Which column a card sits in. Left cards carry Thai text, right cards
/// carry Japanese text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One tappable card. Every entry produces exactly two cards, one per side,
/// linked through `pair_id`; `matched` flips to true exactly once, together
/// with its partner's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCard {
    pub id: String,
    pub text: String,
    pub pair_id: String,
    pub side: Side,
    pub matched: bool,
}

impl MatchCard {
    pub fn new(entry: &Entry, side: Side) -> Self {
        let text = match side {
            Side::Left => entry.thai(),
            Side::Right => entry.japanese(),
        };
        Self {
            id: format!("{}-{}", side.as_str(), entry.id()),
            text: text.to_string(),
            pair_id: entry.id().to_string(),
            side,
            matched: false,
        }
    }
}

/// Immutable per-session configuration.
///
/// A non-empty `selected` list is authoritative: those entries are paired
/// verbatim and `item_count` only applies to random draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub game_type: GameType,
    pub item_count: usize,
    pub timer: TimerOption,
    #[serde(default)]
    pub selected: Vec<Entry>,
}

/// Final outcome of a session, produced exactly once and handed to the
/// result presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub total_pairs: usize,
    pub matched_pairs: usize,
    pub time_used_secs: u32,
    pub timer_setting: TimerOption,
}
