//! Tauri commands exposed to the frontend.

pub mod audio;
pub mod content;
pub mod game;

use serde::{Deserialize, Serialize};

/// Serializable error envelope for every command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<crate::store::StoreError> for CommandError {
    fn from(e: crate::store::StoreError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<match_core::GameError> for CommandError {
    fn from(e: match_core::GameError) -> Self {
        Self::new(e.to_string())
    }
}

pub use audio::cue_wav;
pub use content::{
    add_custom_sentence, add_custom_word, available_count, list_sentences, list_words,
    remove_custom_sentence, remove_custom_word,
};
pub use game::{game_view, quit_game, score_summary, start_game, tap_card};
