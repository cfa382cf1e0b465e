//! Game session Tauri commands.

use match_core::content;
use match_core::engine::{Cue, GameView, MatchEngine, Outcome, Phase, TapOutcome};
use match_core::score::ScoreSummary;
use match_core::session::{clamp_item_count, resolve_entries};
use match_core::types::{Entry, GameResult, GameSettings, GameType, TimerOption};
use tauri::{AppHandle, Emitter, State};

use super::CommandError;
use crate::session::{self, ActiveGame, OverEvent};
use crate::state::AppState;
use crate::store::ContentRepository;

#[derive(Debug, serde::Deserialize)]
pub struct StartGameRequest {
    pub game_type: GameType,
    pub item_count: usize,
    pub timer_seconds: u32,
    /// Explicit selection from the word-selection screen; empty means a
    /// random draw.
    #[serde(default)]
    pub selected: Vec<Entry>,
}

/// What a tap changed, plus the counters the header shows.
#[derive(Debug, serde::Serialize)]
pub struct TapReply {
    pub outcome: TapOutcome,
    pub cues: Vec<Cue>,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub phase: Phase,
}

/// Start a new session, tearing down any previous one first.
#[tauri::command]
pub async fn start_game(
    request: StartGameRequest,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<GameView, CommandError> {
    let timer = TimerOption::try_from(request.timer_seconds)?;
    let pool = load_pool(&state, request.game_type);
    let settings = GameSettings {
        game_type: request.game_type,
        item_count: clamp_item_count(request.item_count, pool.len()),
        timer,
        selected: request.selected,
    };

    let mut rng = rand::rng();
    let entries = resolve_entries(&settings, &pool, &mut rng);
    let engine = MatchEngine::new(settings, &entries, &mut rng);

    let mut slot = state.game.lock().expect("game lock");
    // A new session must never coexist with a previous session's pending
    // callbacks.
    if let Some(mut previous) = slot.take() {
        previous.cancel_tasks();
        tracing::debug!(session = %previous.id, "replaced unfinished session");
    }

    let mut active = ActiveGame::new(engine);
    let session_id = active.id;
    let view = active.engine.view();

    if active.engine.phase() == Phase::Playing {
        let ticker = session::spawn_ticker(app.clone(), state.game_handle(), session_id);
        active.track(ticker);
    } else {
        // Zero-pair session: terminal from the start, only the result
        // handoff remains.
        let _ = app.emit(
            "game://over",
            OverEvent {
                outcome: Outcome::Win,
                matched_pairs: 0,
                total_pairs: 0,
            },
        );
        let finisher = session::spawn_finisher(app.clone(), state.game_handle(), session_id);
        active.track(finisher);
    }

    tracing::info!(session = %session_id, pairs = view.total_pairs, "game started");
    *slot = Some(active);
    Ok(view)
}

/// Apply one tap to the current session.
#[tauri::command]
pub async fn tap_card(
    card_id: String,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<TapReply, CommandError> {
    let mut slot = state.game.lock().expect("game lock");
    let active = slot
        .as_mut()
        .ok_or_else(|| CommandError::new("no active game session"))?;
    let session_id = active.id;
    let response = active.engine.tap(&card_id);

    match &response.outcome {
        TapOutcome::Mismatched { card_ids } => {
            let handle = session::spawn_mismatch_clear(
                app.clone(),
                state.game_handle(),
                session_id,
                card_ids.clone(),
            );
            active.track(handle);
        }
        TapOutcome::Matched { won: true, .. } => {
            let _ = app.emit(
                "game://over",
                OverEvent {
                    outcome: Outcome::Win,
                    matched_pairs: active.engine.matched_pairs(),
                    total_pairs: active.engine.total_pairs(),
                },
            );
            let handle = session::spawn_finisher(app.clone(), state.game_handle(), session_id);
            active.track(handle);
        }
        _ => {}
    }

    Ok(TapReply {
        matched_pairs: active.engine.matched_pairs(),
        total_pairs: active.engine.total_pairs(),
        phase: active.engine.phase(),
        outcome: response.outcome,
        cues: response.cues,
    })
}

/// Current session snapshot, if any (used when re-entering the screen).
#[tauri::command]
pub async fn game_view(state: State<'_, AppState>) -> Result<Option<GameView>, CommandError> {
    let slot = state.game.lock().expect("game lock");
    Ok(slot.as_ref().map(|active| active.engine.view()))
}

/// Abandon the current session (early navigation away). Cancels every
/// pending timer before the slot is cleared.
#[tauri::command]
pub async fn quit_game(state: State<'_, AppState>) -> Result<(), CommandError> {
    if let Some(mut active) = state.game.lock().expect("game lock").take() {
        active.cancel_tasks();
        tracing::info!(session = %active.id, "game abandoned");
    }
    Ok(())
}

/// Result-screen presentation for a finished session.
#[tauri::command]
pub async fn score_summary(result: GameResult) -> Result<ScoreSummary, CommandError> {
    Ok(ScoreSummary::from_result(&result))
}

/// Built-in plus custom entries. A corrupt custom blob degrades to the
/// built-ins so a bad save never blocks starting a game.
fn load_pool(state: &State<'_, AppState>, game_type: GameType) -> Vec<Entry> {
    let store = state.store.lock().expect("store lock");
    match game_type {
        GameType::Word => {
            let custom = store.custom_words().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable custom words");
                Vec::new()
            });
            content::default_words()
                .into_iter()
                .chain(custom)
                .map(Entry::Word)
                .collect()
        }
        GameType::Sentence => {
            let custom = store.custom_sentences().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable custom sentences");
                Vec::new()
            });
            content::default_sentences()
                .into_iter()
                .chain(custom)
                .map(Entry::Sentence)
                .collect()
        }
    }
}
