//! Synthesized sound-effect tones.
//!
//! The four cues are short sine beeps rendered as 8-bit mono WAV at runtime
//! instead of shipping audio assets. The engine only names a cue; the
//! embedding shell fetches the bytes and owns playback.

use crate::engine::Cue;

const SAMPLE_RATE: u32 = 22_050;
const HEADER_LEN: usize = 44;

/// Frequency (Hz), duration (s) and volume (0..1) for a cue.
fn tone_params(cue: Cue) -> (f32, f32, f32) {
    match cue {
        Cue::Tap => (800.0, 0.08, 0.2),
        Cue::Correct => (1200.0, 0.15, 0.3),
        Cue::Wrong => (300.0, 0.25, 0.3),
        Cue::GameOver => (600.0, 0.4, 0.4),
    }
}

/// Render the WAV bytes for a cue.
pub fn wav(cue: Cue) -> Vec<u8> {
    let (frequency, duration, volume) = tone_params(cue);
    render(frequency, duration, volume)
}

/// 8-bit mono PCM sine with a 50 ms attack/decay envelope so the beep does
/// not click at its edges.
fn render(frequency: f32, duration: f32, volume: f32) -> Vec<u8> {
    let num_samples = (SAMPLE_RATE as f32 * duration) as usize;
    let mut buf = Vec::with_capacity(HEADER_LEN + num_samples);
    write_header(&mut buf, num_samples as u32);
    for i in 0..num_samples {
        let t = i as f32 / SAMPLE_RATE as f32;
        let envelope = (t * 20.0).min((duration - t) * 20.0).min(1.0);
        let sample = 128.0
            + 127.0 * volume * envelope * (2.0 * std::f32::consts::PI * frequency * t).sin();
        buf.push(sample as u8);
    }
    buf
}

fn write_header(buf: &mut Vec<u8>, data_len: u32) {
    let file_size = HEADER_LEN as u32 + data_len;
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(file_size - 8).to_le_bytes());
    buf.extend_from_slice(b"WAVE");
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&1u16.to_le_bytes()); // mono
    buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes()); // byte rate, 1 byte per frame
    buf.extend_from_slice(&1u16.to_le_bytes()); // block align
    buf.extend_from_slice(&8u16.to_le_bytes()); // bits per sample
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_len.to_le_bytes());
}
