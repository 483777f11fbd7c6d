//! Offline renderer — plays a cue through a fresh player and mixer and
//! returns the result as samples or a WAV byte buffer.

use crate::cue::Cue;
use crate::player::SoundEffectPlayer;
use crate::preset::Catalog;

use super::mixer::ToneMixer;

/// Render a cue to mono f32 samples, long enough for its last tone to stop.
pub fn render_cue_samples(catalog: &Catalog, cue: Cue, volume: f64, sample_rate: u32) -> Vec<f32> {
    let sr = sample_rate as f64;
    let length = cue.length(catalog.get(cue.sound()).duration);
    let frames = (length * sr).round() as usize + 1;

    let mut player = SoundEffectPlayer::with_output(catalog.clone(), ToneMixer::new(sr));
    player.set_volume(volume);
    player.play_cue(cue);

    match player.output_mut() {
        Some(mixer) => mixer.render(frames),
        None => vec![0.0; frames],
    }
}

/// Render a cue to a WAV file as bytes (16-bit mono PCM).
pub fn render_cue_wav(catalog: &Catalog, cue: Cue, volume: f64, sample_rate: u32) -> Vec<u8> {
    let samples = render_cue_samples(catalog, cue, volume, sample_rate);
    let pcm: Vec<i16> = samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect();
    encode_wav(&pcm, sample_rate, 1)
}

/// Encode interleaved i16 PCM samples to a WAV byte buffer.
fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * channels as u32 * (bits_per_sample as u32 / 8);
    let block_align = channels * (bits_per_sample / 8);
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    buf
}
