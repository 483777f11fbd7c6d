//! Sound presets and the fixed catalog that maps each sound name to one.
//!
//! A catalog can be built from the defaults or read from a JSON object keyed
//! by sound name:
//!
//! ```json
//! { "click": { "frequency": 800, "duration": 0.1, "waveform": "sine" }, ... }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SfxError;

pub use crate::dsp::oscillator::Waveform;

// ── Sound names ─────────────────────────────────────────────

/// Every sound the catalog knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundName {
    Click,
    Hit,
    Collision,
    Button,
    Upgrade,
    Unlock,
    Spawn,
    Death,
    LevelUp,
    Collect,
}

impl SoundName {
    pub const ALL: [SoundName; 10] = [
        SoundName::Click,
        SoundName::Hit,
        SoundName::Collision,
        SoundName::Button,
        SoundName::Upgrade,
        SoundName::Unlock,
        SoundName::Spawn,
        SoundName::Death,
        SoundName::LevelUp,
        SoundName::Collect,
    ];

    /// The string key callers use for this sound.
    pub fn as_str(self) -> &'static str {
        match self {
            SoundName::Click => "click",
            SoundName::Hit => "hit",
            SoundName::Collision => "collision",
            SoundName::Button => "button",
            SoundName::Upgrade => "upgrade",
            SoundName::Unlock => "unlock",
            SoundName::Spawn => "spawn",
            SoundName::Death => "death",
            SoundName::LevelUp => "levelUp",
            SoundName::Collect => "collect",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundName {
    type Err = SfxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SfxError::UnknownSound(s.to_string()))
    }
}

// ── Presets ─────────────────────────────────────────────────

/// Parameters for one synthesized tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundPreset {
    /// Oscillator frequency in Hz.
    pub frequency: f64,
    /// Tone length in seconds, attack included.
    pub duration: f64,
    pub waveform: Waveform,
}

impl SoundPreset {
    pub const fn new(frequency: f64, duration: f64, waveform: Waveform) -> Self {
        SoundPreset {
            frequency,
            duration,
            waveform,
        }
    }

    fn validate(&self, name: SoundName) -> Result<(), SfxError> {
        let invalid = |reason: &str| SfxError::InvalidPreset {
            name,
            reason: reason.to_string(),
        };
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(invalid("frequency must be a positive number of Hz"));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(invalid("duration must be a positive number of seconds"));
        }
        if self.duration > MAX_DURATION {
            return Err(invalid("duration is longer than a sound effect can be"));
        }
        Ok(())
    }
}

/// Longest tone a preset may ask for, in seconds.
pub const MAX_DURATION: f64 = 10.0;

/// Built-in presets, in [`SoundName::ALL`] order.
const DEFAULT_PRESETS: [SoundPreset; 10] = [
    SoundPreset::new(800.0, 0.1, Waveform::Sine),
    SoundPreset::new(600.0, 0.15, Waveform::Square),
    SoundPreset::new(400.0, 0.2, Waveform::Sawtooth),
    SoundPreset::new(1000.0, 0.08, Waveform::Sine),
    SoundPreset::new(1200.0, 0.3, Waveform::Triangle),
    SoundPreset::new(1500.0, 0.4, Waveform::Sine),
    SoundPreset::new(500.0, 0.25, Waveform::Triangle),
    SoundPreset::new(200.0, 0.5, Waveform::Sawtooth),
    SoundPreset::new(2000.0, 0.6, Waveform::Sine),
    SoundPreset::new(1800.0, 0.35, Waveform::Triangle),
];

// ── Catalog ─────────────────────────────────────────────────

/// A complete, read-only mapping from every [`SoundName`] to its preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<SoundName, SoundPreset>",
    into = "BTreeMap<SoundName, SoundPreset>"
)]
pub struct Catalog {
    presets: [SoundPreset; 10],
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            presets: DEFAULT_PRESETS,
        }
    }
}

impl Catalog {
    /// Preset for a sound. Every name has one.
    pub fn get(&self, name: SoundName) -> &SoundPreset {
        &self.presets[name.index()]
    }

    /// Look up a string key. Unknown keys yield `None`.
    pub fn lookup(&self, key: &str) -> Option<(SoundName, &SoundPreset)> {
        let name = key.parse::<SoundName>().ok()?;
        Some((name, self.get(name)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SoundName, &SoundPreset)> {
        SoundName::ALL.into_iter().zip(self.presets.iter())
    }

    /// Read and validate a catalog from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, SfxError> {
        let map: BTreeMap<SoundName, SoundPreset> = serde_json::from_str(json)?;
        Catalog::try_from(map)
    }

    pub fn to_json(&self) -> Result<String, SfxError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TryFrom<BTreeMap<SoundName, SoundPreset>> for Catalog {
    type Error = SfxError;

    fn try_from(map: BTreeMap<SoundName, SoundPreset>) -> Result<Self, Self::Error> {
        let mut presets = DEFAULT_PRESETS;
        for name in SoundName::ALL {
            let preset = map.get(&name).ok_or(SfxError::MissingPreset(name))?;
            preset.validate(name)?;
            presets[name.index()] = *preset;
        }
        Ok(Catalog { presets })
    }
}

impl From<Catalog> for BTreeMap<SoundName, SoundPreset> {
    fn from(catalog: Catalog) -> Self {
        catalog.iter().map(|(name, preset)| (name, *preset)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_click_preset() {
        let catalog = Catalog::default();
        let click = catalog.get(SoundName::Click);
        assert_eq!(click.frequency, 800.0);
        assert_eq!(click.duration, 0.1);
        assert_eq!(click.waveform, Waveform::Sine);
    }

    #[test]
    fn default_presets_line_up_with_names() {
        let catalog = Catalog::default();
        assert_eq!(catalog.get(SoundName::Hit).waveform, Waveform::Square);
        assert_eq!(catalog.get(SoundName::Death).frequency, 200.0);
        assert_eq!(catalog.get(SoundName::LevelUp).duration, 0.6);
        assert_eq!(catalog.get(SoundName::Collect).frequency, 1800.0);
        assert_eq!(catalog.iter().count(), SoundName::ALL.len());
    }

    #[test]
    fn names_parse_from_keys() {
        for name in SoundName::ALL {
            assert_eq!(name.as_str().parse::<SoundName>().unwrap(), name);
        }
        assert_eq!("levelUp".parse::<SoundName>().unwrap(), SoundName::LevelUp);
        assert!(matches!(
            "nonexistent-name".parse::<SoundName>(),
            Err(SfxError::UnknownSound(_))
        ));
    }

    #[test]
    fn lookup_unknown_is_none() {
        let catalog = Catalog::default();
        assert!(catalog.lookup("nonexistent-name").is_none());
        assert!(catalog.lookup("Click").is_none());
        let (name, preset) = catalog.lookup("upgrade").unwrap();
        assert_eq!(name, SoundName::Upgrade);
        assert_eq!(preset.waveform, Waveform::Triangle);
    }

    #[test]
    fn json_roundtrip_keeps_every_preset() {
        let catalog = Catalog::default();
        let json = catalog.to_json().unwrap();
        assert!(json.contains("\"levelUp\""));
        assert!(json.contains("\"sawtooth\""));
        let back = Catalog::from_json(&json).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn json_overrides_a_preset() {
        let mut map: BTreeMap<SoundName, SoundPreset> = Catalog::default().into();
        map.insert(SoundName::Click, SoundPreset::new(660.0, 0.05, Waveform::Square));
        let json = serde_json::to_string(&map).unwrap();

        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.get(SoundName::Click).frequency, 660.0);
        assert_eq!(catalog.get(SoundName::Click).waveform, Waveform::Square);
    }

    #[test]
    fn json_missing_preset_is_rejected() {
        let json = r#"{ "click": { "frequency": 800, "duration": 0.1, "waveform": "sine" } }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, SfxError::MissingPreset(SoundName::Hit)), "got {err}");
    }

    #[test]
    fn json_invalid_preset_is_rejected() {
        let mut map: BTreeMap<SoundName, SoundPreset> = Catalog::default().into();
        map.insert(SoundName::Spawn, SoundPreset::new(500.0, 0.0, Waveform::Triangle));
        let json = serde_json::to_string(&map).unwrap();

        match Catalog::from_json(&json) {
            Err(SfxError::InvalidPreset { name, .. }) => assert_eq!(name, SoundName::Spawn),
            other => panic!("expected InvalidPreset, got {other:?}"),
        }
    }

    #[test]
    fn json_overlong_duration_is_rejected() {
        let mut map: BTreeMap<SoundName, SoundPreset> = Catalog::default().into();
        map.insert(SoundName::Death, SoundPreset::new(200.0, 1e12, Waveform::Sawtooth));
        let json = serde_json::to_string(&map).unwrap();
        assert!(matches!(
            Catalog::from_json(&json),
            Err(SfxError::InvalidPreset { name: SoundName::Death, .. })
        ));

        map.insert(SoundName::Death, SoundPreset::new(200.0, MAX_DURATION, Waveform::Sawtooth));
        let json = serde_json::to_string(&map).unwrap();
        assert!(Catalog::from_json(&json).is_ok());
    }

    #[test]
    fn json_unknown_key_is_config_error() {
        let json = r#"{ "whoosh": { "frequency": 300, "duration": 0.2, "waveform": "sine" } }"#;
        assert!(matches!(Catalog::from_json(json), Err(SfxError::Config(_))));
    }
}
