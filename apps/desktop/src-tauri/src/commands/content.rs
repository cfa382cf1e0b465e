//! Content listing and custom-entry management commands.

use match_core::content;
use match_core::types::{GameType, SentenceEntry, WordEntry};
use tauri::State;

use super::CommandError;
use crate::state::AppState;
use crate::store::ContentRepository;

/// Word listing with the custom ids marked, so the frontend can filter
/// built-in vs user entries without a second round trip.
#[derive(Debug, serde::Serialize)]
pub struct WordList {
    pub entries: Vec<WordEntry>,
    pub custom_ids: Vec<String>,
}

/// Sentence listing, same shape as [`WordList`].
#[derive(Debug, serde::Serialize)]
pub struct SentenceList {
    pub entries: Vec<SentenceEntry>,
    pub custom_ids: Vec<String>,
}

/// Built-in words followed by user-added words in storage order.
#[tauri::command]
pub async fn list_words(state: State<'_, AppState>) -> Result<WordList, CommandError> {
    let store = state.store.lock().expect("store lock");
    let custom = store.custom_words()?;
    let custom_ids = custom.iter().map(|w| w.id.clone()).collect();
    let mut entries = content::default_words();
    entries.extend(custom);
    Ok(WordList {
        entries,
        custom_ids,
    })
}

/// Built-in sentences followed by user-added sentences in storage order.
#[tauri::command]
pub async fn list_sentences(state: State<'_, AppState>) -> Result<SentenceList, CommandError> {
    let store = state.store.lock().expect("store lock");
    let custom = store.custom_sentences()?;
    let custom_ids = custom.iter().map(|s| s.id.clone()).collect();
    let mut entries = content::default_sentences();
    entries.extend(custom);
    Ok(SentenceList {
        entries,
        custom_ids,
    })
}

/// Pool size for the settings screen's pair-count clamp.
#[tauri::command]
pub async fn available_count(
    game_type: GameType,
    state: State<'_, AppState>,
) -> Result<usize, CommandError> {
    let store = state.store.lock().expect("store lock");
    let count = match game_type {
        GameType::Word => content::default_words().len() + store.custom_words()?.len(),
        GameType::Sentence => {
            content::default_sentences().len() + store.custom_sentences()?.len()
        }
    };
    Ok(count)
}

#[derive(Debug, serde::Deserialize)]
pub struct NewWordRequest {
    pub japanese: String,
    #[serde(default)]
    pub reading: String,
    pub thai: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct NewSentenceRequest {
    pub japanese: String,
    #[serde(default)]
    pub reading: String,
    pub thai: String,
    #[serde(default)]
    pub category: String,
}

/// Add a user word; the store assigns its id.
#[tauri::command]
pub async fn add_custom_word(
    request: NewWordRequest,
    state: State<'_, AppState>,
) -> Result<WordEntry, CommandError> {
    let store = state.store.lock().expect("store lock");
    let entry = store.add_custom_word(&request.japanese, &request.reading, &request.thai)?;
    tracing::debug!(id = %entry.id, "added custom word");
    Ok(entry)
}

/// Add a user sentence; a blank category falls back to the default.
#[tauri::command]
pub async fn add_custom_sentence(
    request: NewSentenceRequest,
    state: State<'_, AppState>,
) -> Result<SentenceEntry, CommandError> {
    let store = state.store.lock().expect("store lock");
    let entry = store.add_custom_sentence(
        &request.japanese,
        &request.reading,
        &request.thai,
        &request.category,
    )?;
    tracing::debug!(id = %entry.id, "added custom sentence");
    Ok(entry)
}

/// Remove a user word. Returns whether anything was deleted; an unknown id
/// is a quiet no-op.
#[tauri::command]
pub async fn remove_custom_word(
    id: String,
    state: State<'_, AppState>,
) -> Result<bool, CommandError> {
    let store = state.store.lock().expect("store lock");
    store.remove_custom_word(&id).map_err(Into::into)
}

/// Remove a user sentence; same contract as [`remove_custom_word`].
#[tauri::command]
pub async fn remove_custom_sentence(
    id: String,
    state: State<'_, AppState>,
) -> Result<bool, CommandError> {
    let store = state.store.lock().expect("store lock");
    store.remove_custom_sentence(&id).map_err(Into::into)
}
