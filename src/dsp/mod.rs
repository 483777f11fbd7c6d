//! DSP — the tone synthesis behind the player.
//!
//! All synthesis runs in Rust so the same code drives browser playback
//! (samples pulled by an AudioWorklet through WASM) and offline rendering.

pub mod envelope;
pub mod mixer;
pub mod oscillator;
pub mod renderer;
pub mod voice;
