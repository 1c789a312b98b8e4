//! Browser binding (WASM only)
//!
//! JavaScript owns the canvas, asset loading and the animation frame loop;
//! it forwards raw key/pointer/resize events and timestamps here and draws
//! from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::audio::LogAudio;
use crate::persistence::LocalStorageStore;
use crate::platform::ActionDebouncer;
use crate::settings::Settings;
use crate::sim::{Session, tick};
use crate::tuning::Tuning;

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    input: ActionDebouncer,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning_json` may be empty for the default balance
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, tuning_json: &str) -> WebGame {
        console_error_panic_hook::set_once();
        // Second construction in the same page keeps the first logger
        let _ = console_log::init_with_level(log::Level::Info);

        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).unwrap_or_else(|e| {
                log::warn!("Bad tuning, using defaults: {}", e);
                Tuning::default()
            })
        };

        let session = Session::new(
            seed,
            tuning,
            Settings::default(),
            Box::new(LogAudio),
            Box::new(LocalStorageStore),
        );
        log::info!("Flappy Dragon ready");

        WebGame {
            session,
            input: ActionDebouncer::default(),
        }
    }

    /// Animation frame callback
    pub fn frame(&mut self, timestamp_ms: f64) {
        tick(&mut self.session, timestamp_ms);
    }

    /// Page visible again; the next frame starts a fresh delta
    pub fn handle_visible(&mut self) {
        self.session.clock.resync();
    }

    pub fn handle_key(&mut self, code: &str, down: bool, repeat: bool) {
        if down {
            if let Some(action) = self.input.key_down(code, repeat) {
                self.session.handle_action(action);
            }
        } else {
            self.input.key_up(code);
        }
    }

    pub fn handle_pointer(&mut self) {
        let action = self.input.pointer_down();
        self.session.handle_action(action);
    }

    pub fn handle_resize(&mut self, width: f32, height: f32) {
        self.session.handle_resize(width, height);
    }

    pub fn set_sprites_ready(&mut self, ready: bool) {
        self.session.set_sprites_ready(ready);
    }

    pub fn apply_settings(&mut self, settings_json: &str) {
        self.session
            .apply_settings(Settings::from_json_or_default(settings_json));
    }

    /// Current frame as JSON for the canvas renderer
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_default()
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.session.drain_events()).unwrap_or_default()
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn high_score(&self) -> u32 {
        self.session.high_score
    }

    pub fn phase(&self) -> String {
        self.session.phase().as_str().to_string()
    }
}
