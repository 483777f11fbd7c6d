//! Tone oscillators, band-limited with PolyBLEP where the waveform jumps.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Supported waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A single free-running oscillator.
#[derive(Debug, Clone)]
pub struct Oscillator {
    pub waveform: Waveform,
    pub frequency: f64,
    phase: f64,
    sample_rate: f64,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: f64) -> Self {
        Oscillator {
            waveform,
            frequency,
            phase: 0.0,
            sample_rate,
        }
    }

    /// Phase increment per sample.
    fn phase_inc(&self) -> f64 {
        self.frequency / self.sample_rate
    }

    /// Generate the next sample in [-1, 1] (PolyBLEP may overshoot slightly).
    pub fn next_sample(&mut self) -> f64 {
        let inc = self.phase_inc();
        let sample = match self.waveform {
            Waveform::Sine => (2.0 * PI * self.phase).sin(),
            Waveform::Sawtooth => self.sawtooth(inc),
            Waveform::Square => self.square(inc),
            Waveform::Triangle => self.triangle(),
        };

        self.phase = (self.phase + inc).rem_euclid(1.0);

        sample
    }

    fn sawtooth(&self, inc: f64) -> f64 {
        let naive = 2.0 * self.phase - 1.0;
        naive - poly_blep(self.phase, inc)
    }

    fn square(&self, inc: f64) -> f64 {
        let mut value = if self.phase < 0.5 { 1.0 } else { -1.0 };
        value += poly_blep(self.phase, inc);
        value -= poly_blep((self.phase + 0.5) % 1.0, inc);
        value
    }

    /// Piecewise linear: -1 → +1 over the first half, back down over the second.
    fn triangle(&self) -> f64 {
        if self.phase < 0.5 {
            4.0 * self.phase - 1.0
        } else {
            3.0 - 4.0 * self.phase
        }
    }
}

/// PolyBLEP correction around a unit step at phase 0.
///
/// `t` is the phase [0, 1), `dt` is the phase increment per sample.
fn poly_blep(t: f64, dt: f64) -> f64 {
    if t < dt {
        let t = t / dt;
        2.0 * t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + 2.0 * t + 1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_range(waveform: Waveform, limit: f64) {
        let mut osc = Oscillator::new(waveform, 800.0, 44100.0);
        for _ in 0..44100 {
            let s = osc.next_sample();
            assert!(s.abs() <= limit, "{waveform:?} out of range: {s}");
        }
    }

    #[test]
    fn sine_zero_at_start() {
        let mut osc = Oscillator::new(Waveform::Sine, 800.0, 44100.0);
        let sample = osc.next_sample();
        assert!(sample.abs() < 1e-10, "Sine should start near 0, got {sample}");
    }

    #[test]
    fn waveform_ranges() {
        check_range(Waveform::Sine, 1.0);
        check_range(Waveform::Triangle, 1.0);
        check_range(Waveform::Sawtooth, 1.5);
        check_range(Waveform::Square, 1.5);
    }

    #[test]
    fn sine_completes_cycles_at_frequency() {
        // 100 Hz at 8 kHz: one rising zero crossing every 80 samples.
        let mut osc = Oscillator::new(Waveform::Sine, 100.0, 8000.0);
        let mut prev = osc.next_sample();
        let mut crossings = 0;
        for _ in 0..8000 {
            let s = osc.next_sample();
            if prev < 0.0 && s >= 0.0 {
                crossings += 1;
            }
            prev = s;
        }
        assert!((99..=101).contains(&crossings), "got {crossings} cycles");
    }

    #[test]
    fn negative_frequency_stays_in_range() {
        let mut osc = Oscillator::new(Waveform::Square, -600.0, 8000.0);
        let mut sum = 0.0;
        for _ in 0..8000 {
            let s = osc.next_sample();
            assert!(s.abs() <= 1.5, "Square out of range: {s}");
            sum += s;
        }
        assert!((sum / 8000.0).abs() < 0.05, "DC offset {}", sum / 8000.0);
    }

    #[test]
    fn waveform_serializes_lowercase() {
        let json = serde_json::to_string(&Waveform::Sawtooth).unwrap();
        assert_eq!(json, "\"sawtooth\"");
        let back: Waveform = serde_json::from_str("\"triangle\"").unwrap();
        assert_eq!(back, Waveform::Triangle);
    }
}
