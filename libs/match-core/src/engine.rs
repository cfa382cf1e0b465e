//! The match-engine state machine.
//!
//! A session owns two independently shuffled card columns and walks
//! `Playing -> Ending -> Ended`. The engine holds no clocks of its own: the
//! embedding shell feeds `tick()` once per second, `clear_mismatch()` after
//! the wrong-pair feedback delay and `finish()` after the game-over delay,
//! which keeps every transition deterministic and testable.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{Entry, GameResult, GameSettings, MatchCard, Side};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Playing,
    Ending,
    Ended,
}

/// How a session terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Timeout,
}

/// Sound cue named by the engine. Playback is the shell's concern; the
/// engine never touches audio resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Tap,
    Correct,
    Wrong,
    GameOver,
}

/// What a tap did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TapOutcome {
    /// Tap on a matched card, an unknown id, or outside `Playing`.
    Ignored,
    /// Selection landed on (or moved to) this card.
    Selected { card_id: String },
    /// Re-tap on the selected card cleared the selection.
    Deselected,
    /// Opposite-side card completed the selected card's pair.
    Matched { pair_id: String, won: bool },
    /// Opposite-side card did not pair; both stay flagged until
    /// `clear_mismatch`.
    Mismatched { card_ids: [String; 2] },
}

/// Response handed to the shell after a tap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TapResponse {
    pub outcome: TapOutcome,
    pub cues: Vec<Cue>,
}

impl TapResponse {
    fn ignored() -> Self {
        Self {
            outcome: TapOutcome::Ignored,
            cues: Vec::new(),
        }
    }
}

/// Serializable snapshot of the whole session.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub phase: Phase,
    pub outcome: Option<Outcome>,
    pub left: Vec<MatchCard>,
    pub right: Vec<MatchCard>,
    pub selected: Option<String>,
    pub mismatch: Option<[String; 2]>,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub time_left: Option<u32>,
    pub elapsed: u32,
}

/// State machine for one matching session.
pub struct MatchEngine {
    settings: GameSettings,
    phase: Phase,
    outcome: Option<Outcome>,
    left: Vec<MatchCard>,
    right: Vec<MatchCard>,
    selected: Option<String>,
    mismatch: Option<[String; 2]>,
    total_pairs: usize,
    matched_pairs: usize,
    time_left: Option<u32>,
    elapsed: u32,
}

impl MatchEngine {
    /// Build a session from already-resolved entries.
    ///
    /// Zero entries construct directly into the terminal win state: with
    /// nothing to match the session is complete the moment it exists, and
    /// only the result handoff remains.
    pub fn new<R: Rng>(settings: GameSettings, entries: &[Entry], rng: &mut R) -> Self {
        let mut left: Vec<MatchCard> = entries
            .iter()
            .map(|e| MatchCard::new(e, Side::Left))
            .collect();
        let mut right: Vec<MatchCard> = entries
            .iter()
            .map(|e| MatchCard::new(e, Side::Right))
            .collect();
        // The columns shuffle independently: a card's row on one side says
        // nothing about where its pair sits on the other.
        left.shuffle(rng);
        right.shuffle(rng);

        let total_pairs = entries.len();
        let time_left = if settings.timer.is_unlimited() {
            None
        } else {
            Some(settings.timer.seconds())
        };

        let mut engine = Self {
            settings,
            phase: Phase::Playing,
            outcome: None,
            left,
            right,
            selected: None,
            mismatch: None,
            total_pairs,
            matched_pairs: 0,
            time_left,
            elapsed: 0,
        };
        if total_pairs == 0 {
            engine.begin_ending(Outcome::Win);
        }
        engine
    }

    /// Apply one tap. All the selection/match rules live here; the shell
    /// only relays card ids and mirrors the response.
    pub fn tap(&mut self, card_id: &str) -> TapResponse {
        if self.phase != Phase::Playing {
            return TapResponse::ignored();
        }
        let Some(card) = self.card(card_id) else {
            return TapResponse::ignored();
        };
        if card.matched {
            return TapResponse::ignored();
        }
        let side = card.side;
        let pair_id = card.pair_id.clone();

        let selected_id = match self.selected.clone() {
            None => {
                self.selected = Some(card_id.to_string());
                return TapResponse {
                    outcome: TapOutcome::Selected {
                        card_id: card_id.to_string(),
                    },
                    cues: vec![Cue::Tap],
                };
            }
            Some(s) if s == card_id => {
                self.selected = None;
                return TapResponse {
                    outcome: TapOutcome::Deselected,
                    cues: vec![Cue::Tap],
                };
            }
            Some(s) => s,
        };

        let selected_same_side = self
            .card(&selected_id)
            .map(|c| c.side == side)
            .unwrap_or(true);
        if selected_same_side {
            // Same-side cards cannot be compared; the selection moves.
            self.selected = Some(card_id.to_string());
            return TapResponse {
                outcome: TapOutcome::Selected {
                    card_id: card_id.to_string(),
                },
                cues: vec![Cue::Tap],
            };
        }

        let selected_pair = self
            .card(&selected_id)
            .map(|c| c.pair_id.clone())
            .unwrap_or_default();
        if selected_pair == pair_id {
            self.mark_matched(&pair_id);
            self.matched_pairs += 1;
            self.selected = None;
            let won = self.matched_pairs == self.total_pairs;
            let mut cues = vec![Cue::Correct];
            if won {
                self.begin_ending(Outcome::Win);
                cues.push(Cue::GameOver);
            }
            return TapResponse {
                outcome: TapOutcome::Matched { pair_id, won },
                cues,
            };
        }

        // Wrong pair: transient feedback only, the score is untouched. The
        // selection stays until the shell's clear fires, as on the screen.
        let card_ids = [selected_id, card_id.to_string()];
        self.mismatch = Some(card_ids.clone());
        TapResponse {
            outcome: TapOutcome::Mismatched { card_ids },
            cues: vec![Cue::Wrong],
        }
    }

    /// Advance both clocks by one second. Returns the termination outcome
    /// when this tick ends the session; outside `Playing` it is a no-op,
    /// which is what "stop both counters" means for a tick-driven engine.
    pub fn tick(&mut self) -> Option<Outcome> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.elapsed += 1;
        if let Some(left) = self.time_left.as_mut() {
            *left = left.saturating_sub(1);
            if *left == 0 {
                self.begin_ending(Outcome::Timeout);
                return Some(Outcome::Timeout);
            }
        }
        None
    }

    /// Clear transient wrong-pair feedback and the selection it held onto.
    /// Scheduled by the shell after the feedback delay; harmless when
    /// nothing is pending.
    pub fn clear_mismatch(&mut self) {
        if self.mismatch.take().is_some() {
            self.selected = None;
        }
    }

    /// Complete the `Ending -> Ended` transition and emit the final result.
    /// The result is produced exactly once; any other state returns `None`.
    pub fn finish(&mut self) -> Option<GameResult> {
        if self.phase != Phase::Ending {
            return None;
        }
        self.phase = Phase::Ended;
        Some(GameResult {
            total_pairs: self.total_pairs,
            matched_pairs: self.matched_pairs,
            time_used_secs: self.elapsed,
            timer_setting: self.settings.timer,
        })
    }

    pub fn view(&self) -> GameView {
        GameView {
            phase: self.phase,
            outcome: self.outcome,
            left: self.left.clone(),
            right: self.right.clone(),
            selected: self.selected.clone(),
            mismatch: self.mismatch.clone(),
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs,
            time_left: self.time_left,
            elapsed: self.elapsed,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn time_left(&self) -> Option<u32> {
        self.time_left
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    fn begin_ending(&mut self, outcome: Outcome) {
        self.phase = Phase::Ending;
        self.outcome = Some(outcome);
    }

    fn card(&self, card_id: &str) -> Option<&MatchCard> {
        self.left
            .iter()
            .chain(self.right.iter())
            .find(|c| c.id == card_id)
    }

    fn mark_matched(&mut self, pair_id: &str) {
        // Both flags flip in the same call, never one without the other.
        for card in self.left.iter_mut().chain(self.right.iter_mut()) {
            if card.pair_id == pair_id {
                card.matched = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameType, TimerOption, WordEntry};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn word(id: &str) -> Entry {
        Entry::Word(WordEntry {
            id: id.to_string(),
            japanese: format!("jp-{id}"),
            reading: String::new(),
            thai: format!("th-{id}"),
        })
    }

    fn entries(n: usize) -> Vec<Entry> {
        (0..n).map(|i| word(&format!("e{i}"))).collect()
    }

    fn settings(timer: TimerOption) -> GameSettings {
        GameSettings {
            game_type: GameType::Word,
            item_count: 10,
            timer,
            selected: Vec::new(),
        }
    }

    fn engine_with(n: usize, timer: TimerOption) -> MatchEngine {
        let mut rng = StdRng::seed_from_u64(42);
        MatchEngine::new(settings(timer), &entries(n), &mut rng)
    }

    fn left_id(entry: &str) -> String {
        format!("left-{entry}")
    }

    fn right_id(entry: &str) -> String {
        format!("right-{entry}")
    }

    fn pair_flags_consistent(engine: &MatchEngine) -> bool {
        let view = engine.view();
        view.left.iter().all(|l| {
            view.right
                .iter()
                .find(|r| r.pair_id == l.pair_id)
                .map(|r| r.matched == l.matched)
                .unwrap_or(false)
        })
    }

    #[test]
    fn first_tap_selects() {
        let mut engine = engine_with(3, TimerOption::Unlimited);
        let response = engine.tap(&left_id("e0"));
        assert_eq!(
            response.outcome,
            TapOutcome::Selected {
                card_id: left_id("e0")
            }
        );
        assert_eq!(response.cues, vec![Cue::Tap]);
        assert_eq!(engine.view().selected, Some(left_id("e0")));
    }

    #[test]
    fn retap_deselects_with_no_other_effect() {
        let mut engine = engine_with(3, TimerOption::Unlimited);
        engine.tap(&left_id("e0"));
        let response = engine.tap(&left_id("e0"));
        assert_eq!(response.outcome, TapOutcome::Deselected);
        let view = engine.view();
        assert_eq!(view.selected, None);
        assert_eq!(view.matched_pairs, 0);
        assert!(view.left.iter().all(|c| !c.matched));
    }

    #[test]
    fn same_side_tap_moves_selection() {
        let mut engine = engine_with(3, TimerOption::Unlimited);
        engine.tap(&left_id("e0"));
        let response = engine.tap(&left_id("e1"));
        assert_eq!(
            response.outcome,
            TapOutcome::Selected {
                card_id: left_id("e1")
            }
        );
        assert_eq!(engine.view().selected, Some(left_id("e1")));
        assert_eq!(engine.matched_pairs(), 0);
    }

    #[test]
    fn opposite_side_equal_pair_matches() {
        let mut engine = engine_with(3, TimerOption::Unlimited);
        engine.tap(&left_id("e1"));
        let response = engine.tap(&right_id("e1"));
        assert_eq!(
            response.outcome,
            TapOutcome::Matched {
                pair_id: "e1".to_string(),
                won: false
            }
        );
        assert_eq!(response.cues, vec![Cue::Correct]);
        let view = engine.view();
        assert_eq!(view.matched_pairs, 1);
        assert_eq!(view.selected, None);
        assert!(view
            .left
            .iter()
            .chain(view.right.iter())
            .filter(|c| c.pair_id == "e1")
            .all(|c| c.matched));
        assert!(pair_flags_consistent(&engine));
    }

    #[test]
    fn match_works_right_to_left_too() {
        let mut engine = engine_with(3, TimerOption::Unlimited);
        engine.tap(&right_id("e2"));
        let response = engine.tap(&left_id("e2"));
        assert!(matches!(response.outcome, TapOutcome::Matched { .. }));
        assert_eq!(engine.matched_pairs(), 1);
    }

    #[test]
    fn mismatch_flags_both_and_keeps_selection() {
        let mut engine = engine_with(3, TimerOption::Unlimited);
        engine.tap(&left_id("e0"));
        let response = engine.tap(&right_id("e1"));
        assert_eq!(
            response.outcome,
            TapOutcome::Mismatched {
                card_ids: [left_id("e0"), right_id("e1")]
            }
        );
        assert_eq!(response.cues, vec![Cue::Wrong]);
        let view = engine.view();
        assert_eq!(view.matched_pairs, 0);
        assert_eq!(view.mismatch, Some([left_id("e0"), right_id("e1")]));
        // The selection survives until the deferred clear fires.
        assert_eq!(view.selected, Some(left_id("e0")));
    }

    #[test]
    fn clear_mismatch_resets_feedback_and_selection() {
        let mut engine = engine_with(3, TimerOption::Unlimited);
        engine.tap(&left_id("e0"));
        engine.tap(&right_id("e1"));
        engine.clear_mismatch();
        let view = engine.view();
        assert_eq!(view.mismatch, None);
        assert_eq!(view.selected, None);
    }

    #[test]
    fn clear_mismatch_without_pending_mismatch_keeps_selection() {
        let mut engine = engine_with(3, TimerOption::Unlimited);
        engine.tap(&left_id("e0"));
        engine.clear_mismatch();
        assert_eq!(engine.view().selected, Some(left_id("e0")));
    }

    #[test]
    fn matched_cards_ignore_taps() {
        let mut engine = engine_with(3, TimerOption::Unlimited);
        engine.tap(&left_id("e0"));
        engine.tap(&right_id("e0"));
        let response = engine.tap(&left_id("e0"));
        assert_eq!(response.outcome, TapOutcome::Ignored);
        assert!(response.cues.is_empty());
    }

    #[test]
    fn unknown_card_is_ignored() {
        let mut engine = engine_with(3, TimerOption::Unlimited);
        let response = engine.tap("left-nope");
        assert_eq!(response.outcome, TapOutcome::Ignored);
        assert_eq!(engine.view().selected, None);
    }

    #[test]
    fn completing_all_pairs_wins_regardless_of_remaining_time() {
        let mut engine = engine_with(5, TimerOption::ThirtySeconds);
        engine.tick();
        for i in 0..5 {
            engine.tap(&left_id(&format!("e{i}")));
            engine.tap(&right_id(&format!("e{i}")));
        }
        assert_eq!(engine.phase(), Phase::Ending);
        assert_eq!(engine.outcome(), Some(Outcome::Win));
        assert!(engine.time_left().unwrap() > 0);
    }

    #[test]
    fn final_match_carries_game_over_cue() {
        let mut engine = engine_with(1, TimerOption::Unlimited);
        engine.tap(&left_id("e0"));
        let response = engine.tap(&right_id("e0"));
        assert_eq!(
            response.outcome,
            TapOutcome::Matched {
                pair_id: "e0".to_string(),
                won: true
            }
        );
        assert_eq!(response.cues, vec![Cue::Correct, Cue::GameOver]);
    }

    #[test]
    fn countdown_reaching_zero_times_out() {
        let mut engine = engine_with(5, TimerOption::ThirtySeconds);
        for _ in 0..29 {
            assert_eq!(engine.tick(), None);
        }
        assert_eq!(engine.tick(), Some(Outcome::Timeout));
        assert_eq!(engine.phase(), Phase::Ending);
        assert_eq!(engine.outcome(), Some(Outcome::Timeout));
        assert_eq!(engine.elapsed(), 30);
    }

    #[test]
    fn unlimited_timer_never_times_out() {
        let mut engine = engine_with(2, TimerOption::Unlimited);
        for _ in 0..500 {
            assert_eq!(engine.tick(), None);
        }
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.elapsed(), 500);
    }

    #[test]
    fn counters_stop_once_ending() {
        let mut engine = engine_with(1, TimerOption::ThirtySeconds);
        engine.tap(&left_id("e0"));
        engine.tap(&right_id("e0"));
        let frozen = engine.elapsed();
        for _ in 0..10 {
            assert_eq!(engine.tick(), None);
        }
        assert_eq!(engine.elapsed(), frozen);
    }

    #[test]
    fn taps_rejected_once_ending() {
        let mut engine = engine_with(2, TimerOption::ThirtySeconds);
        for _ in 0..30 {
            engine.tick();
        }
        let response = engine.tap(&left_id("e0"));
        assert_eq!(response.outcome, TapOutcome::Ignored);
    }

    #[test]
    fn finish_emits_the_result_exactly_once() {
        let mut engine = engine_with(2, TimerOption::ThirtySeconds);
        engine.tap(&left_id("e0"));
        engine.tap(&right_id("e0"));
        for _ in 0..30 {
            engine.tick();
        }
        let result = engine.finish().unwrap();
        assert_eq!(result.total_pairs, 2);
        assert_eq!(result.matched_pairs, 1);
        assert_eq!(result.time_used_secs, 30);
        assert_eq!(result.timer_setting, TimerOption::ThirtySeconds);
        assert_eq!(engine.phase(), Phase::Ended);
        assert_eq!(engine.finish(), None);
    }

    #[test]
    fn finish_before_ending_returns_none() {
        let mut engine = engine_with(2, TimerOption::Unlimited);
        assert_eq!(engine.finish(), None);
        assert_eq!(engine.phase(), Phase::Playing);
    }

    #[test]
    fn zero_entries_session_is_an_immediate_win() {
        let mut engine = engine_with(0, TimerOption::Unlimited);
        assert_eq!(engine.phase(), Phase::Ending);
        assert_eq!(engine.outcome(), Some(Outcome::Win));
        let result = engine.finish().unwrap();
        assert_eq!(result.total_pairs, 0);
        assert_eq!(result.matched_pairs, 0);
    }

    #[test]
    fn columns_are_permutations_of_the_entry_set() {
        let engine = engine_with(10, TimerOption::Unlimited);
        let view = engine.view();
        let expected: Vec<String> = (0..10).map(|i| format!("e{i}")).collect();

        let mut left_pairs: Vec<String> =
            view.left.iter().map(|c| c.pair_id.clone()).collect();
        let mut right_pairs: Vec<String> =
            view.right.iter().map(|c| c.pair_id.clone()).collect();
        left_pairs.sort();
        right_pairs.sort();
        let mut expected_sorted = expected.clone();
        expected_sorted.sort();
        assert_eq!(left_pairs, expected_sorted);
        assert_eq!(right_pairs, expected_sorted);
    }

    #[test]
    fn columns_shuffle_independently() {
        // With enough entries the two columns practically never land in the
        // same order; a fixed seed keeps this deterministic.
        let engine = engine_with(12, TimerOption::Unlimited);
        let view = engine.view();
        let left_pairs: Vec<&str> = view.left.iter().map(|c| c.pair_id.as_str()).collect();
        let right_pairs: Vec<&str> = view.right.iter().map(|c| c.pair_id.as_str()).collect();
        assert_ne!(left_pairs, right_pairs);
    }

    #[test]
    fn invariants_hold_under_a_tap_storm() {
        use rand::seq::IndexedRandom;

        let mut engine = engine_with(6, TimerOption::Unlimited);
        let ids: Vec<String> = (0..6)
            .flat_map(|i| [left_id(&format!("e{i}")), right_id(&format!("e{i}"))])
            .collect();
        let mut rng = StdRng::seed_from_u64(99);
        for step in 0..400 {
            let id = ids.choose(&mut rng).expect("non-empty ids");
            engine.tap(id);
            if step % 7 == 0 {
                engine.clear_mismatch();
            }
            assert!(engine.matched_pairs() <= engine.total_pairs());
            assert!(pair_flags_consistent(&engine));
        }
    }

    #[test]
    fn three_pair_walkthrough() {
        let mut rng = StdRng::seed_from_u64(5);
        let entries = vec![word("a"), word("b"), word("c")];
        let settings = GameSettings {
            game_type: GameType::Word,
            item_count: 3,
            timer: TimerOption::Unlimited,
            selected: entries.clone(),
        };
        let mut engine = MatchEngine::new(settings, &entries, &mut rng);
        assert_eq!(engine.total_pairs(), 3);
        assert_eq!(engine.view().left.len() + engine.view().right.len(), 6);

        engine.tap(&left_id("a"));
        engine.tap(&right_id("a"));
        assert_eq!(engine.matched_pairs(), 1);

        engine.tick();
        engine.tick();

        // Pairs complete in arbitrary order.
        engine.tap(&right_id("c"));
        engine.tap(&left_id("c"));
        engine.tap(&left_id("b"));
        let response = engine.tap(&right_id("b"));
        assert_eq!(
            response.outcome,
            TapOutcome::Matched {
                pair_id: "b".to_string(),
                won: true
            }
        );
        assert_eq!(engine.outcome(), Some(Outcome::Win));
        let result = engine.finish().unwrap();
        assert_eq!(result.matched_pairs, 3);
        assert_eq!(result.time_used_secs, 2);
    }
}
