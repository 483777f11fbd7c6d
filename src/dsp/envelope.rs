//! One-shot tone envelope: a fast linear attack to the peak gain, then an
//! exponential decay that reaches [`DECAY_FLOOR`] exactly when the tone stops.

/// Length of the linear attack in seconds.
pub const ATTACK_TIME: f64 = 0.01;

/// Gain reached at the end of the exponential decay.
pub const DECAY_FLOOR: f64 = 0.001;

/// Gain-over-time for one tone.
#[derive(Debug, Clone)]
pub struct ToneEnvelope {
    peak: f64,
    attack_samples: usize,
    total_samples: usize,
    /// Per-sample multiplier during decay.
    decay_ratio: f64,
    position: usize,
    level: f64,
}

impl ToneEnvelope {
    /// `duration` is the whole tone length in seconds, attack included.
    pub fn new(peak: f64, duration: f64, sample_rate: f64) -> Self {
        let total_samples = (duration.max(0.0) * sample_rate).round() as usize;
        let attack_samples = ((ATTACK_TIME * sample_rate).round() as usize).min(total_samples);
        let decay_samples = total_samples - attack_samples;

        let decay_ratio = if peak > 0.0 && decay_samples > 0 {
            (DECAY_FLOOR / peak).powf(1.0 / decay_samples as f64)
        } else {
            0.0
        };

        ToneEnvelope {
            peak: peak.max(0.0),
            attack_samples,
            total_samples,
            decay_ratio,
            position: 0,
            level: peak.max(0.0),
        }
    }

    /// Generate the next gain value.
    pub fn next_sample(&mut self) -> f64 {
        let n = self.position;
        if n >= self.total_samples || self.peak == 0.0 {
            self.position = self.position.saturating_add(1);
            return 0.0;
        }
        self.position += 1;

        if n < self.attack_samples {
            return self.peak * n as f64 / self.attack_samples as f64;
        }

        // Decay: `level` holds peak × ratio^(n - attack).
        let out = self.level;
        self.level *= self.decay_ratio;
        out
    }

    /// Has the tone reached its stop time?
    pub fn is_finished(&self) -> bool {
        self.position >= self.total_samples || self.peak == 0.0
    }
}
