/// Sound engine: procedural 8-bit style sound effects via rodio.
///
/// All sounds are generated as in-memory WAV buffers at init time and
/// looked up by the names sessions queue (`jump`, `fire`, `pop`, `hurt`,
/// `over`). Playback is fire-and-forget via rodio's Sink.
///
/// Without the "sound" feature the stub SoundEngine does nothing.

use std::f32::consts::PI;

const SAMPLE_RATE: u32 = 22050;

#[cfg(feature = "sound")]
mod inner {
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::{effect, make_wav, EFFECTS};

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        buffers: HashMap<&'static str, Arc<Vec<u8>>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("no audio output, sound disabled: {e}");
                    return None;
                }
            };

            let buffers = EFFECTS
                .iter()
                .filter_map(|&name| Some((name, Arc::new(make_wav(&effect(name)?)))))
                .collect();

            Some(SoundEngine { _stream: stream, handle, buffers })
        }

        /// Play a named effect. Unknown names are ignored.
        pub fn play(&self, name: &str) {
            let Some(buf) = self.buffers.get(name) else {
                log::debug!("unknown sound '{name}'");
                return;
            };
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }
    }
}

/// Every effect a session may request.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
pub const EFFECTS: [&str; 5] = ["jump", "fire", "pop", "hurt", "over"];

/// Samples for a named effect.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn effect(name: &str) -> Option<Vec<f32>> {
    let samples = match name {
        "jump" => gen_sweep(300.0, 700.0, 0.10, 0.25),
        "fire" => gen_sweep(1200.0, 500.0, 0.07, 0.2),
        "pop" => gen_pop(),
        "hurt" => gen_hurt(),
        "over" => gen_over(),
        _ => return None,
    };
    Some(samples)
}

// ════════════════════════════════════════════════════════════
//  Waveform generators — all produce Vec<f32> mono samples
// ════════════════════════════════════════════════════════════

/// Sine sweep from `from` to `to` Hz with a linear fade out.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn gen_sweep(from: f32, to: f32, duration: f32, volume: f32) -> Vec<f32> {
    let n = (SAMPLE_RATE as f32 * duration) as usize;
    let mut phase = 0.0_f32;
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            let freq = from + (to - from) * t;
            phase += freq * 2.0 * PI / SAMPLE_RATE as f32;
            phase.sin() * (1.0 - t) * volume
        })
        .collect()
}

/// Debris shot down: short noise burst over a rising tone.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn gen_pop() -> Vec<f32> {
    let n = (SAMPLE_RATE as f32 * 0.09) as usize;
    let mut rng: u32 = 12345;
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            let ti = i as f32 / SAMPLE_RATE as f32;
            let tone = (ti * (400.0 + t * 600.0) * 2.0 * PI).sin();
            // Simple LCG noise
            rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
            let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
            (tone * 0.5 + noise * 0.5) * (1.0 - t).powf(0.8) * 0.3
        })
        .collect()
}

/// Player hit: two harsh falling notes.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn gen_hurt() -> Vec<f32> {
    let mut samples = Vec::new();
    for &freq in &[330.0_f32, 220.0] {
        let n = (SAMPLE_RATE as f32 * 0.08) as usize;
        for i in 0..n {
            let t = i as f32 / SAMPLE_RATE as f32;
            // Square-ish wave (sine + 3rd harmonic) for retro feel
            let wave = (t * freq * 2.0 * PI).sin() * 0.7 + (t * freq * 3.0 * 2.0 * PI).sin() * 0.3;
            samples.push(wave * (1.0 - i as f32 / n as f32) * 0.3);
        }
    }
    samples
}

/// Game over: slow descending phrase with a final fade.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn gen_over() -> Vec<f32> {
    let notes = [392.0_f32, 330.0, 262.0, 196.0]; // G4→E4→C4→G3
    let note_dur = 0.18;
    let mut samples = Vec::new();
    for &freq in &notes {
        let n = (SAMPLE_RATE as f32 * note_dur) as usize;
        for i in 0..n {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = 1.0 - (i as f32 / n as f32) * 0.3;
            samples.push((t * freq * 2.0 * PI).sin() * env * 0.3);
        }
    }
    let total = samples.len();
    let fade_len = total / 4;
    for (i, s) in samples.iter_mut().enumerate().skip(total - fade_len) {
        *s *= (total - i) as f32 / fade_len as f32;
    }
    samples
}

// ════════════════════════════════════════════════════════════
//  WAV encoder — wraps f32 samples into a valid WAV buffer
// ════════════════════════════════════════════════════════════

#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn make_wav(samples: &[f32]) -> Vec<u8> {
    let num_channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
    let block_align = num_channels * bits_per_sample / 8;
    let data_size = samples.len() as u32 * 2; // 16-bit = 2 bytes per sample
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&num_channels.to_le_bytes());
    buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
        buf.extend_from_slice(&val.to_le_bytes());
    }

    buf
}

// ════════════════════════════════════════════════════════════
//  Public API — compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play(&self, _name: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_effect_generates_audible_samples() {
        for name in EFFECTS {
            let samples = effect(name).unwrap();
            assert!(!samples.is_empty(), "{name}");
            assert!(samples.iter().all(|s| s.abs() <= 1.0), "{name}");
            assert!(samples.iter().any(|s| s.abs() > 0.01), "{name}");
        }
    }

    #[test]
    fn unknown_effect_is_none() {
        assert!(effect("kazoo").is_none());
    }

    #[test]
    fn wav_header_describes_samples() {
        let wav = make_wav(&[0.0, 0.5, -0.5]);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + 3 * 2);
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size, 6);
    }
}
