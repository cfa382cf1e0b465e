//! Application state.

use std::sync::{Arc, Mutex};

use crate::session::{ActiveGame, SharedGame};
use crate::store::SqliteStore;

/// Global application state.
pub struct AppState {
    pub store: Arc<Mutex<SqliteStore>>,
    pub game: SharedGame,
}

impl AppState {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            game: Arc::new(Mutex::new(None::<ActiveGame>)),
        }
    }

    /// Clone of the shared session slot, handed to timer tasks.
    pub fn game_handle(&self) -> SharedGame {
        Arc::clone(&self.game)
    }
}
