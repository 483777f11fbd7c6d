use crate::preset::SoundName;
use std::fmt;

#[derive(Debug)]
pub enum SfxError {
    /// The host has no audio output to hand to the player.
    NoAudioOutput,
    /// A string key that names no sound in the catalog.
    UnknownSound(String),
    /// A catalog configuration that leaves a sound without a preset.
    MissingPreset(SoundName),
    InvalidPreset {
        name: SoundName,
        reason: String,
    },
    Config(serde_json::Error),
}

impl fmt::Display for SfxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SfxError::NoAudioOutput => write!(f, "No audio output available"),
            SfxError::UnknownSound(name) => write!(f, "Unknown sound '{name}'"),
            SfxError::MissingPreset(name) => write!(f, "Catalog has no preset for '{name}'"),
            SfxError::InvalidPreset { name, reason } => {
                write!(f, "Invalid preset '{name}': {reason}")
            }
            SfxError::Config(e) => write!(f, "Catalog config error: {e}"),
        }
    }
}

impl std::error::Error for SfxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SfxError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SfxError {
    fn from(e: serde_json::Error) -> Self {
        SfxError::Config(e)
    }
}
