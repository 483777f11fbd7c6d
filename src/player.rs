//! SoundEffectPlayer — turns named play requests into scheduled tones.
//!
//! The player owns a [`Catalog`] and a small amount of state (enabled flag,
//! volume). It never renders audio itself: each play call builds
//! [`ToneRequest`]s and hands them to an [`AudioOutput`], which renders them
//! on its own timeline. Every play call either schedules immediately or is
//! skipped; none of them fail.

use serde::{Deserialize, Serialize};

use crate::cue::Cue;
use crate::error::SfxError;
use crate::preset::{Catalog, SoundName, SoundPreset, Waveform};

/// Fraction of the player volume used as the tone's peak gain.
pub const PEAK_GAIN_SCALE: f64 = 0.3;

/// Delay between consecutive tones of a sequence, in seconds.
pub const SEQUENCE_STEP: f64 = 0.05;

/// One tone handed to the output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneRequest {
    pub frequency: f64,
    pub waveform: Waveform,
    /// Seconds from start to stop.
    pub duration: f64,
    /// Gain reached at the end of the attack.
    pub peak_gain: f64,
    /// Start time on the output's timeline, in seconds.
    pub start: f64,
}

/// Something that can render enveloped tones.
pub trait AudioOutput {
    /// Current position of the output timeline, in seconds.
    fn current_time(&self) -> f64;

    /// Schedule a tone. The output starts it at `tone.start` and releases it
    /// after `tone.duration`; once handed over it cannot be cancelled.
    fn start_tone(&mut self, tone: ToneRequest);
}

/// What a play call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// This many tones were handed to the output.
    Scheduled(usize),
    Disabled,
    /// No audio output was ever acquired.
    Uninitialized,
    UnknownSound,
}

impl PlayOutcome {
    /// At least one tone reached the output.
    pub fn is_scheduled(self) -> bool {
        matches!(self, PlayOutcome::Scheduled(n) if n > 0)
    }
}

/// Mutable player settings. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    enabled: bool,
    /// Always within [0, 1].
    volume: f64,
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState {
            enabled: true,
            volume: 0.5,
        }
    }
}

impl PlayerState {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the enabled flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = clamp_volume(volume);
    }
}

/// Clamp to [0, 1]; NaN becomes silence.
fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Finite and above zero.
pub fn is_playable_frequency(frequency: f64) -> bool {
    frequency.is_finite() && frequency > 0.0
}

/// Acquisition state of the output.
enum Output<O> {
    Pending,
    Ready(O),
    Unavailable,
}

pub struct SoundEffectPlayer<O> {
    catalog: Catalog,
    state: PlayerState,
    output: Output<O>,
}

impl<O: AudioOutput> SoundEffectPlayer<O> {
    /// An enabled player at volume 0.5, with no output yet.
    pub fn new(catalog: Catalog) -> Self {
        SoundEffectPlayer {
            catalog,
            state: PlayerState::default(),
            output: Output::Pending,
        }
    }

    /// Build a player that already owns its output.
    pub fn with_output(catalog: Catalog, output: O) -> Self {
        SoundEffectPlayer {
            catalog,
            state: PlayerState::default(),
            output: Output::Ready(output),
        }
    }

    /// Acquire the audio output. Only the first call runs `open`; a failure
    /// is remembered and leaves every play call a no-op.
    ///
    /// Returns whether an output is available.
    pub fn initialize<F>(&mut self, open: F) -> bool
    where
        F: FnOnce() -> Result<O, SfxError>,
    {
        if let Output::Pending = self.output {
            self.output = match open() {
                Ok(output) => Output::Ready(output),
                Err(_) => Output::Unavailable,
            };
        }
        self.is_ready()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.output, Output::Ready(_))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn output(&self) -> Option<&O> {
        match &self.output {
            Output::Ready(output) => Some(output),
            _ => None,
        }
    }

    pub fn output_mut(&mut self) -> Option<&mut O> {
        match &mut self.output {
            Output::Ready(output) => Some(output),
            _ => None,
        }
    }

    pub fn volume(&self) -> f64 {
        self.state.volume()
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled()
    }

    /// Store `volume` clamped to [0, 1]. Tones already scheduled keep the
    /// gain they were scheduled with.
    pub fn set_volume(&mut self, volume: f64) {
        self.state.set_volume(volume);
    }

    /// Flip the enabled flag and return the new value. Tones already handed
    /// to the output still play.
    pub fn toggle(&mut self) -> bool {
        self.state.toggle()
    }

    /// Play a sound by its string key. Unknown keys are ignored.
    pub fn play(&mut self, key: &str) -> PlayOutcome {
        if let Some(skipped) = self.skip_reason() {
            return skipped;
        }
        let Some((name, _)) = self.catalog.lookup(key) else {
            return PlayOutcome::UnknownSound;
        };
        self.play_preset(name)
    }

    /// Play one tone with the preset's own frequency.
    pub fn play_preset(&mut self, name: SoundName) -> PlayOutcome {
        let preset = *self.catalog.get(name);
        self.schedule(&preset, [preset.frequency])
    }

    /// Play a sequence by its string key. Unknown keys are ignored.
    pub fn play_complex(&mut self, key: &str, frequencies: &[f64]) -> PlayOutcome {
        if let Some(skipped) = self.skip_reason() {
            return skipped;
        }
        let Some((name, _)) = self.catalog.lookup(key) else {
            return PlayOutcome::UnknownSound;
        };
        self.play_sequence(name, frequencies)
    }

    /// One tone per frequency, each with the preset's waveform and duration,
    /// started [`SEQUENCE_STEP`] apart.
    pub fn play_sequence(&mut self, name: SoundName, frequencies: &[f64]) -> PlayOutcome {
        let preset = *self.catalog.get(name);
        self.schedule(&preset, frequencies.iter().copied())
    }

    /// Play one of the fixed named cues.
    pub fn play_cue(&mut self, cue: Cue) -> PlayOutcome {
        match cue.frequencies() {
            Some(frequencies) => self.play_sequence(cue.sound(), frequencies),
            None => self.play_preset(cue.sound()),
        }
    }

    pub fn play_upgrade_success(&mut self) -> PlayOutcome {
        self.play_cue(Cue::UpgradeSuccess)
    }

    pub fn play_level_complete(&mut self) -> PlayOutcome {
        self.play_cue(Cue::LevelComplete)
    }

    pub fn play_collision(&mut self) -> PlayOutcome {
        self.play_cue(Cue::Collision)
    }

    pub fn play_button_click(&mut self) -> PlayOutcome {
        self.play_cue(Cue::ButtonClick)
    }

    pub fn play_ball_hit(&mut self) -> PlayOutcome {
        self.play_cue(Cue::BallHit)
    }

    pub fn play_ball_click(&mut self) -> PlayOutcome {
        self.play_cue(Cue::BallClick)
    }

    pub fn play_ball_spawn(&mut self) -> PlayOutcome {
        self.play_cue(Cue::BallSpawn)
    }

    pub fn play_ball_death(&mut self) -> PlayOutcome {
        self.play_cue(Cue::BallDeath)
    }

    pub fn play_collect_reward(&mut self) -> PlayOutcome {
        self.play_cue(Cue::CollectReward)
    }

    pub fn play_unlock(&mut self) -> PlayOutcome {
        self.play_cue(Cue::Unlock)
    }

    fn skip_reason(&self) -> Option<PlayOutcome> {
        if !self.state.enabled() {
            Some(PlayOutcome::Disabled)
        } else if !self.is_ready() {
            Some(PlayOutcome::Uninitialized)
        } else {
            None
        }
    }

    fn schedule<I>(&mut self, preset: &SoundPreset, frequencies: I) -> PlayOutcome
    where
        I: IntoIterator<Item = f64>,
    {
        if let Some(skipped) = self.skip_reason() {
            return skipped;
        }
        let peak_gain = self.state.volume() * PEAK_GAIN_SCALE;
        let Output::Ready(output) = &mut self.output else {
            return PlayOutcome::Uninitialized;
        };

        let now = output.current_time();
        let mut count = 0;
        for (i, frequency) in frequencies.into_iter().enumerate() {
            // Unplayable steps are skipped but keep their slot in the stagger.
            if !is_playable_frequency(frequency) {
                continue;
            }
            output.start_tone(ToneRequest {
                frequency,
                waveform: preset.waveform,
                duration: preset.duration,
                peak_gain,
                start: now + i as f64 * SEQUENCE_STEP,
            });
            count += 1;
        }
        PlayOutcome::Scheduled(count)
    }
}
