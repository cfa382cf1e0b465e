//! Active game session: engine ownership and timer scheduling.
//!
//! One session owns the engine plus every task scheduled on its behalf: the
//! per-second ticker, the mismatch-clear delay and the finish delay. Every
//! task captures the session id and re-checks it under the lock before
//! touching anything, and teardown aborts whatever is still pending, so a
//! torn-down session is never mutated by a stale callback and a new session
//! never starts with old callbacks alive.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use match_core::engine::{MatchEngine, Outcome, Phase};
use match_core::types::{GameResult, GameSettings};
use serde::Serialize;
use tauri::async_runtime::JoinHandle;
use tauri::{AppHandle, Emitter};
use uuid::Uuid;

/// Delay before a wrong pair's feedback is cleared.
pub const MISMATCH_CLEAR_DELAY: Duration = Duration::from_millis(500);
/// Delay between the game-over cue and the result handoff.
pub const FINISH_DELAY: Duration = Duration::from_millis(1500);

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Shared slot holding the current session, if any.
pub type SharedGame = Arc<Mutex<Option<ActiveGame>>>;

/// A running (or ending) game session.
pub struct ActiveGame {
    pub id: Uuid,
    pub engine: MatchEngine,
    tasks: Vec<JoinHandle<()>>,
}

impl ActiveGame {
    pub fn new(engine: MatchEngine) -> Self {
        Self {
            id: Uuid::new_v4(),
            engine,
            tasks: Vec::new(),
        }
    }

    /// Keep a scheduled task so teardown can reach it.
    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.tasks.push(handle);
    }

    /// Abort every pending timer and deferred callback.
    pub fn cancel_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

/// Per-second clock payload (`game://tick`).
#[derive(Debug, Clone, Serialize)]
pub struct TickEvent {
    pub elapsed: u32,
    pub time_left: Option<u32>,
}

/// Terminal cue payload (`game://over`).
#[derive(Debug, Clone, Serialize)]
pub struct OverEvent {
    pub outcome: Outcome,
    pub matched_pairs: usize,
    pub total_pairs: usize,
}

/// Wrong-pair feedback expiry (`game://mismatch-cleared`).
#[derive(Debug, Clone, Serialize)]
pub struct MismatchClearedEvent {
    pub card_ids: [String; 2],
}

/// Result handoff to the presentation layer (`game://finished`).
#[derive(Debug, Clone, Serialize)]
pub struct FinishedEvent {
    pub result: GameResult,
    pub settings: GameSettings,
}

/// Start the per-second ticker for the session identified by `session_id`.
/// The ticker stops itself as soon as the session is gone, replaced, or no
/// longer playing.
pub fn spawn_ticker(app: AppHandle, game: SharedGame, session_id: Uuid) -> JoinHandle<()> {
    tauri::async_runtime::spawn(async move {
        loop {
            tokio::time::sleep(TICK_INTERVAL).await;
            let timed_out = {
                let mut slot = game.lock().expect("game lock");
                let Some(active) = slot.as_mut() else { break };
                if active.id != session_id {
                    break;
                }
                if active.engine.phase() != Phase::Playing {
                    // A winning tap already scheduled the finish handoff.
                    break;
                }
                let ended = active.engine.tick();
                let _ = app.emit(
                    "game://tick",
                    TickEvent {
                        elapsed: active.engine.elapsed(),
                        time_left: active.engine.time_left(),
                    },
                );
                if let Some(outcome) = ended {
                    let _ = app.emit(
                        "game://over",
                        OverEvent {
                            outcome,
                            matched_pairs: active.engine.matched_pairs(),
                            total_pairs: active.engine.total_pairs(),
                        },
                    );
                }
                ended.is_some()
            };
            if timed_out {
                schedule_finish(app.clone(), game.clone(), session_id);
                break;
            }
        }
    })
}

/// Schedule the result handoff and register it with the session.
pub fn schedule_finish(app: AppHandle, game: SharedGame, session_id: Uuid) {
    let handle = spawn_finisher(app, game.clone(), session_id);
    if let Some(active) = game.lock().expect("game lock").as_mut() {
        if active.id == session_id {
            active.track(handle);
        }
    }
}

/// After the game-over delay, emit the final result and drop the session.
/// Safe to spawn while the session lock is held: the task only takes the
/// lock after its delay.
pub fn spawn_finisher(app: AppHandle, game: SharedGame, session_id: Uuid) -> JoinHandle<()> {
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(FINISH_DELAY).await;
        let payload = {
            let mut slot = game.lock().expect("game lock");
            match slot.take() {
                Some(mut active) if active.id == session_id => {
                    let settings = active.engine.settings().clone();
                    match active.engine.finish() {
                        Some(result) => {
                            // The session is over; abort whatever it still
                            // has scheduled. Aborting this task too is fine,
                            // there are no awaits left.
                            active.cancel_tasks();
                            Some(FinishedEvent { result, settings })
                        }
                        None => {
                            *slot = Some(active);
                            None
                        }
                    }
                }
                other => {
                    *slot = other;
                    None
                }
            }
        };
        if let Some(event) = payload {
            tracing::info!(
                matched = event.result.matched_pairs,
                total = event.result.total_pairs,
                "game finished"
            );
            let _ = app.emit("game://finished", event);
        }
    })
}

/// After the feedback delay, clear the wrong pair and the selection.
pub fn spawn_mismatch_clear(
    app: AppHandle,
    game: SharedGame,
    session_id: Uuid,
    card_ids: [String; 2],
) -> JoinHandle<()> {
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(MISMATCH_CLEAR_DELAY).await;
        let cleared = {
            let mut slot = game.lock().expect("game lock");
            match slot.as_mut() {
                Some(active) if active.id == session_id => {
                    active.engine.clear_mismatch();
                    true
                }
                _ => false,
            }
        };
        if cleared {
            let _ = app.emit("game://mismatch-cleared", MismatchClearedEvent { card_ids });
        }
    })
}
