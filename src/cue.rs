//! Fixed game cues: each one is a sound name, optionally played as a
//! staggered sequence of frequencies instead of the preset's own pitch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SfxError;
use crate::preset::SoundName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cue {
    UpgradeSuccess,
    LevelComplete,
    Collision,
    ButtonClick,
    BallHit,
    BallClick,
    BallSpawn,
    BallDeath,
    CollectReward,
    Unlock,
}

impl Cue {
    pub const ALL: [Cue; 10] = [
        Cue::UpgradeSuccess,
        Cue::LevelComplete,
        Cue::Collision,
        Cue::ButtonClick,
        Cue::BallHit,
        Cue::BallClick,
        Cue::BallSpawn,
        Cue::BallDeath,
        Cue::CollectReward,
        Cue::Unlock,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Cue::UpgradeSuccess => "upgradeSuccess",
            Cue::LevelComplete => "levelComplete",
            Cue::Collision => "collision",
            Cue::ButtonClick => "buttonClick",
            Cue::BallHit => "ballHit",
            Cue::BallClick => "ballClick",
            Cue::BallSpawn => "ballSpawn",
            Cue::BallDeath => "ballDeath",
            Cue::CollectReward => "collectReward",
            Cue::Unlock => "unlock",
        }
    }

    /// Preset whose waveform and duration the cue uses.
    pub fn sound(self) -> SoundName {
        match self {
            Cue::UpgradeSuccess => SoundName::Upgrade,
            Cue::LevelComplete => SoundName::LevelUp,
            Cue::Collision => SoundName::Collision,
            Cue::ButtonClick => SoundName::Button,
            Cue::BallHit => SoundName::Hit,
            Cue::BallClick => SoundName::Click,
            Cue::BallSpawn => SoundName::Spawn,
            Cue::BallDeath => SoundName::Death,
            Cue::CollectReward => SoundName::Collect,
            Cue::Unlock => SoundName::Unlock,
        }
    }

    /// Arpeggio frequencies in Hz, or `None` for a single preset tone.
    pub fn frequencies(self) -> Option<&'static [f64]> {
        match self {
            Cue::UpgradeSuccess => Some(&[800.0, 1000.0, 1200.0, 1500.0]),
            Cue::LevelComplete => Some(&[1000.0, 1200.0, 1500.0, 2000.0, 2500.0]),
            Cue::CollectReward => Some(&[1200.0, 1500.0, 1800.0]),
            Cue::Unlock => Some(&[800.0, 1200.0, 1600.0, 2000.0]),
            _ => None,
        }
    }

    /// Seconds from the first tone's start to the last tone's stop, given
    /// the preset duration.
    pub fn length(self, preset_duration: f64) -> f64 {
        let steps = self.frequencies().map_or(1, <[f64]>::len).max(1);
        (steps - 1) as f64 * crate::player::SEQUENCE_STEP + preset_duration
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cue {
    type Err = SfxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cue::ALL
            .into_iter()
            .find(|cue| cue.as_str() == s)
            .ok_or_else(|| SfxError::UnknownSound(s.to_string()))
    }
}
