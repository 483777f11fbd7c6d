pub mod cue;
pub mod dsp;
pub mod error;
pub mod player;
pub mod preset;

pub use crate::cue::Cue;
pub use crate::error::SfxError;
pub use crate::player::{AudioOutput, PlayOutcome, SoundEffectPlayer, ToneRequest};
pub use crate::preset::{Catalog, SoundName, SoundPreset, Waveform};

use crate::dsp::mixer::ToneMixer;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the blipfx version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

fn to_js(e: SfxError) -> JsValue {
    JsValue::from_str(&format!("{e}"))
}

/// WASM-exposed sound manager. The page calls the play methods; its
/// AudioWorklet pulls the mixed output with `render`.
#[wasm_bindgen]
pub struct WebSoundManager {
    player: SoundEffectPlayer<ToneMixer>,
}

#[wasm_bindgen]
impl WebSoundManager {
    /// A manager with the built-in catalog.
    #[wasm_bindgen(constructor)]
    pub fn new(sample_rate: f64) -> WebSoundManager {
        WebSoundManager {
            player: SoundEffectPlayer::with_output(Catalog::default(), ToneMixer::new(sample_rate)),
        }
    }

    /// A manager with a catalog read from JSON.
    #[wasm_bindgen(js_name = withCatalog)]
    pub fn with_catalog(sample_rate: f64, catalog_json: &str) -> Result<WebSoundManager, JsValue> {
        let catalog = Catalog::from_json(catalog_json).map_err(to_js)?;
        Ok(WebSoundManager {
            player: SoundEffectPlayer::with_output(catalog, ToneMixer::new(sample_rate)),
        })
    }

    /// Returns whether anything was scheduled.
    pub fn play(&mut self, name: &str) -> bool {
        self.player.play(name).is_scheduled()
    }

    #[wasm_bindgen(js_name = playComplex)]
    pub fn play_complex(&mut self, name: &str, frequencies: Vec<f64>) -> bool {
        self.player.play_complex(name, &frequencies).is_scheduled()
    }

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, volume: f64) {
        self.player.set_volume(volume);
    }

    #[wasm_bindgen(getter)]
    pub fn volume(&self) -> f64 {
        self.player.volume()
    }

    #[wasm_bindgen(getter)]
    pub fn enabled(&self) -> bool {
        self.player.is_enabled()
    }

    pub fn toggle(&mut self) -> bool {
        self.player.toggle()
    }

    /// Mixed mono f32 output for the next `frames` samples.
    pub fn render(&mut self, frames: usize) -> Vec<f32> {
        match self.player.output_mut() {
            Some(mixer) => mixer.render(frames),
            None => vec![0.0; frames],
        }
    }

    /// The catalog as a plain JS object keyed by sound name.
    pub fn catalog(&self) -> Result<JsValue, JsValue> {
        self.player
            .catalog()
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    #[wasm_bindgen(js_name = playUpgradeSuccess)]
    pub fn play_upgrade_success(&mut self) {
        self.player.play_upgrade_success();
    }

    #[wasm_bindgen(js_name = playLevelComplete)]
    pub fn play_level_complete(&mut self) {
        self.player.play_level_complete();
    }

    #[wasm_bindgen(js_name = playCollision)]
    pub fn play_collision(&mut self) {
        self.player.play_collision();
    }

    #[wasm_bindgen(js_name = playButtonClick)]
    pub fn play_button_click(&mut self) {
        self.player.play_button_click();
    }

    #[wasm_bindgen(js_name = playBallHit)]
    pub fn play_ball_hit(&mut self) {
        self.player.play_ball_hit();
    }

    #[wasm_bindgen(js_name = playBallClick)]
    pub fn play_ball_click(&mut self) {
        self.player.play_ball_click();
    }

    #[wasm_bindgen(js_name = playBallSpawn)]
    pub fn play_ball_spawn(&mut self) {
        self.player.play_ball_spawn();
    }

    #[wasm_bindgen(js_name = playBallDeath)]
    pub fn play_ball_death(&mut self) {
        self.player.play_ball_death();
    }

    #[wasm_bindgen(js_name = playCollectReward)]
    pub fn play_collect_reward(&mut self) {
        self.player.play_collect_reward();
    }

    #[wasm_bindgen(js_name = playUnlock)]
    pub fn play_unlock(&mut self) {
        self.player.play_unlock();
    }
}

/// WASM-exposed: render a named cue (e.g. "levelComplete") to a WAV byte
/// array with the built-in catalog.
#[wasm_bindgen]
pub fn render_cue_wav(cue: &str, volume: f64, sample_rate: u32) -> Result<Vec<u8>, JsValue> {
    let cue: Cue = cue.parse().map_err(to_js)?;
    Ok(dsp::renderer::render_cue_wav(&Catalog::default(), cue, volume, sample_rate))
}
