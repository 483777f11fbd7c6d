//! Mixer — a sample-clocked [`AudioOutput`] that sums scheduled tones.
//!
//! The host pulls blocks with [`ToneMixer::render`] (an AudioWorklet through
//! WASM, or the offline renderer). Tones wait in a queue until the clock
//! reaches their start sample, play through their envelope, and are dropped
//! once they stop.

use crate::player::{AudioOutput, ToneRequest, is_playable_frequency};

use super::voice::ToneVoice;

struct PendingTone {
    start_sample: u64,
    tone: ToneRequest,
}

pub struct ToneMixer {
    pub master_gain: f64,
    sample_rate: f64,
    /// Samples rendered so far.
    clock: u64,
    /// Sorted by start sample.
    pending: Vec<PendingTone>,
    active: Vec<ToneVoice>,
}

impl ToneMixer {
    pub fn new(sample_rate: f64) -> Self {
        ToneMixer {
            master_gain: 1.0,
            sample_rate,
            clock: 0,
            pending: Vec::new(),
            active: Vec::new(),
        }
    }

    /// Tones queued or sounding.
    pub fn voice_count(&self) -> usize {
        self.pending.len() + self.active.len()
    }

    pub fn is_idle(&self) -> bool {
        self.voice_count() == 0
    }

    /// Render the next `frames` mono samples, with master gain and soft
    /// clipping applied.
    pub fn render(&mut self, frames: usize) -> Vec<f32> {
        let mut out = Vec::with_capacity(frames);
        for _ in 0..frames {
            self.activate_due();

            let mut sum = 0.0;
            for voice in self.active.iter_mut() {
                sum += voice.next_sample();
            }
            self.active.retain(|v| !v.is_finished());

            out.push(soft_clip(sum * self.master_gain) as f32);
            self.clock += 1;
        }
        out
    }

    fn activate_due(&mut self) {
        let due = self
            .pending
            .iter()
            .take_while(|p| p.start_sample <= self.clock)
            .count();
        for pending in self.pending.drain(..due) {
            self.active.push(ToneVoice::new(&pending.tone, self.sample_rate));
        }
    }
}

impl AudioOutput for ToneMixer {
    fn current_time(&self) -> f64 {
        self.clock as f64 / self.sample_rate
    }

    fn start_tone(&mut self, tone: ToneRequest) {
        if !is_playable_frequency(tone.frequency) || !tone.duration.is_finite() {
            return;
        }
        // Past start times play on the next rendered sample.
        let start_sample = (tone.start.max(0.0) * self.sample_rate).round() as u64;
        let start_sample = start_sample.max(self.clock);
        let at = self.pending.partition_point(|p| p.start_sample <= start_sample);
        self.pending.insert(at, PendingTone { start_sample, tone });
    }
}

/// Soft clipper using tanh to prevent harsh digital clipping.
fn soft_clip(x: f64) -> f64 {
    x.tanh()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::Waveform;

    const SR: f64 = 8000.0;

    fn tone(start: f64) -> ToneRequest {
        ToneRequest {
            frequency: 1000.0,
            waveform: Waveform::Square,
            duration: 0.1,
            peak_gain: 0.3,
            start,
        }
    }

    #[test]
    fn silent_without_tones() {
        let mut m = ToneMixer::new(SR);
        let out = m.render(128);
        assert_eq!(out.len(), 128);
        assert!(out.iter().all(|&s| s == 0.0));
        assert!((m.current_time() - 128.0 / SR).abs() < 1e-12);
    }

    #[test]
    fn delayed_tone_waits_for_its_start() {
        let mut m = ToneMixer::new(SR);
        m.start_tone(tone(0.05));
        let before = m.render(400);
        assert!(before.iter().all(|&s| s == 0.0), "tone started early");
        let after = m.render(400);
        assert!(after.iter().any(|s| s.abs() > 0.01), "tone never started");
    }

    #[test]
    fn tone_is_released_after_duration() {
        let mut m = ToneMixer::new(SR);
        m.start_tone(tone(0.0));
        assert_eq!(m.voice_count(), 1);
        m.render(800);
        assert!(m.is_idle());
        assert!(m.render(100).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn past_start_plays_immediately() {
        let mut m = ToneMixer::new(SR);
        m.render(1000);
        m.start_tone(tone(0.0));
        let out = m.render(200);
        assert!(out.iter().any(|s| s.abs() > 0.01));
    }

    #[test]
    fn tones_are_summed() {
        let mut single = ToneMixer::new(SR);
        single.start_tone(tone(0.0));
        let one = single.render(200);

        let mut double = ToneMixer::new(SR);
        double.start_tone(tone(0.0));
        double.start_tone(tone(0.0));
        let two = double.render(200);

        let peak = |buf: &[f32]| buf.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak(&two) > peak(&one));
    }

    #[test]
    fn bad_tone_cannot_poison_the_mix() {
        let mut m = ToneMixer::new(SR);
        m.start_tone(ToneRequest {
            frequency: f64::NAN,
            ..tone(0.0)
        });
        m.start_tone(ToneRequest {
            frequency: -1000.0,
            ..tone(0.0)
        });
        m.start_tone(tone(0.0));
        assert_eq!(m.voice_count(), 1);

        let out = m.render(800);
        assert!(out.iter().all(|s| s.is_finite()));
        assert!(out.iter().any(|s| s.abs() > 0.01));
        let mean = out.iter().sum::<f32>() / out.len() as f32;
        assert!(mean.abs() < 0.05, "DC offset {mean}");
    }

    #[test]
    fn soft_clip_prevents_overflow() {
        let mut m = ToneMixer::new(SR);
        for _ in 0..20 {
            m.start_tone(tone(0.0));
        }
        for s in m.render(800) {
            assert!(s.abs() <= 1.0, "Soft clip should keep output <= 1.0, got {s}");
        }
    }
}
