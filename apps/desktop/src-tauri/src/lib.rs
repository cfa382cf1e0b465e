mod commands;
mod session;
mod state;
mod store;

use commands::audio::cue_wav;
use commands::content::{
    add_custom_sentence, add_custom_word, available_count, list_sentences, list_words,
    remove_custom_sentence, remove_custom_word,
};
use commands::game::{game_view, quit_game, score_summary, start_game, tap_card};
use state::AppState;
use std::path::PathBuf;
use store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn get_db_path() -> PathBuf {
    // Use app data directory for production, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kotoba-pairs")
        .join("content.db")
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Ensure data directory exists
    let db_path = get_db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let store = SqliteStore::open(&db_path).expect("failed to open content store");
    let app_state = AppState::new(store);

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // Content commands
            list_words,
            list_sentences,
            available_count,
            add_custom_word,
            add_custom_sentence,
            remove_custom_word,
            remove_custom_sentence,
            // Game commands
            start_game,
            tap_card,
            game_view,
            quit_game,
            score_summary,
            // Audio commands
            cue_wav,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
