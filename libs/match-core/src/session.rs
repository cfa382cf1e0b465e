//! Session configuration: item-count clamping and entry resolution.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Entry, GameSettings};

/// Smallest pair count the settings screen offers.
pub const MIN_ITEMS: usize = 10;
/// Largest pair count the settings screen offers.
pub const MAX_ITEMS: usize = 30;

/// Clamp a requested pair count to what the content pool can supply.
///
/// The legal range is `[min(10, available), min(30, available)]`, so a pool
/// smaller than ten collapses the range to the pool size and an empty pool
/// yields zero.
pub fn clamp_item_count(requested: usize, available: usize) -> usize {
    let min = MIN_ITEMS.min(available);
    let max = MAX_ITEMS.min(available);
    requested.clamp(min, max)
}

/// Resolve the entry set a session will pair.
///
/// A non-empty explicit selection is used verbatim and its length is
/// authoritative for pairing; `item_count` only bounds random draws.
/// Otherwise the pool is uniformly permuted and truncated to `item_count`.
pub fn resolve_entries<R: Rng>(
    settings: &GameSettings,
    pool: &[Entry],
    rng: &mut R,
) -> Vec<Entry> {
    if !settings.selected.is_empty() {
        return settings.selected.clone();
    }
    let mut drawn = pool.to_vec();
    drawn.shuffle(rng);
    drawn.truncate(settings.item_count);
    drawn
}
