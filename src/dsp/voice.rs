//! Voice — one scheduled tone: an oscillator shaped by a [`ToneEnvelope`].

use crate::player::ToneRequest;

use super::envelope::ToneEnvelope;
use super::oscillator::Oscillator;

#[derive(Debug, Clone)]
pub struct ToneVoice {
    pub oscillator: Oscillator,
    pub envelope: ToneEnvelope,
}

impl ToneVoice {
    pub fn new(tone: &ToneRequest, sample_rate: f64) -> Self {
        ToneVoice {
            oscillator: Oscillator::new(tone.waveform, tone.frequency, sample_rate),
            envelope: ToneEnvelope::new(tone.peak_gain, tone.duration, sample_rate),
        }
    }

    /// Generate the next sample; silence once the tone has stopped.
    pub fn next_sample(&mut self) -> f64 {
        if self.envelope.is_finished() {
            return 0.0;
        }
        let gain = self.envelope.next_sample();
        self.oscillator.next_sample() * gain
    }

    /// Is the tone past its stop time? The mixer releases it then.
    pub fn is_finished(&self) -> bool {
        self.envelope.is_finished()
    }
}
