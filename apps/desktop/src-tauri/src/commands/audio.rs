//! Sound-cue commands.

use match_core::engine::Cue;
use match_core::tone;

use super::CommandError;

/// WAV bytes for a named cue; the frontend owns playback.
#[tauri::command]
pub async fn cue_wav(cue: Cue) -> Result<Vec<u8>, CommandError> {
    Ok(tone::wav(cue))
}
