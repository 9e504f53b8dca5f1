//! WASM bindings for storymode: powers the in-browser storyboard preview.
//!
//! The page owns the DOM, the playback timer and speech synthesis. It calls
//! `tick()` once per pacing interval and renders whatever `frame()` returns.

use wasm_bindgen::prelude::*;

use storymode::core::demo::DEMO_STORY;
use storymode::core::narration::{usable_voices, VoiceInfo};
use storymode::core::pipeline::StoryboardEngine;
use storymode::core::session::{PlaybackState, Session};
use storymode::schema::settings::{SceneLength, Settings, Style};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize)]
struct SettingsInput {
    style: Option<String>,
    pacing_seconds: Option<f64>,
    scene_length: Option<String>,
    voice: Option<String>,
}

impl SettingsInput {
    fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            style: self.style.map(Style).unwrap_or(defaults.style),
            pacing_seconds: self.pacing_seconds.unwrap_or(defaults.pacing_seconds),
            scene_length: self
                .scene_length
                .as_deref()
                .map(SceneLength::from_name)
                .unwrap_or(defaults.scene_length),
            voice: self.voice.filter(|v| !v.is_empty()),
            rules: Vec::new(),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

fn parse_voices(voices_json: &str) -> Result<Vec<VoiceInfo>, JsError> {
    if voices_json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(voices_json)
        .map_err(|e| JsError::new(&format!("Invalid voices JSON: {e}")))
}

// ---------------------------------------------------------------------------
// Storymode: the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct Storymode {
    session: Session,
}

#[wasm_bindgen]
impl Storymode {
    /// Create a session. `settings_json` may be empty for defaults.
    ///
    /// Expected JSON shape (every field optional):
    /// ```json
    /// {
    ///   "style": "noir",
    ///   "pacing_seconds": 4,
    ///   "scene_length": "medium",
    ///   "voice": "Daniel"
    /// }
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str) -> Result<Storymode, JsError> {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            let input: SettingsInput = serde_json::from_str(settings_json)
                .map_err(|e| JsError::new(&format!("Invalid settings JSON: {e}")))?;
            input.into_settings()
        };
        settings
            .validate()
            .map_err(|e| JsError::new(&format!("Invalid settings: {e}")))?;

        Ok(Storymode {
            session: Session::new(StoryboardEngine::default(), settings),
        })
    }

    /// Split `text` into scenes. Returns the scene count.
    pub fn generate(&mut self, text: &str) -> Result<usize, JsError> {
        self.session
            .generate(text)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Jump to a scene (0-based). Stops playback.
    pub fn go_to(&mut self, index: usize) {
        self.session.go_to(index);
    }

    pub fn play(&mut self) {
        self.session.play();
    }

    pub fn pause(&mut self) {
        self.session.pause();
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    /// Advance one pacing interval. Returns whether the frame changed.
    pub fn tick(&mut self) -> bool {
        self.session.tick()
    }

    /// Whether the page's timer should keep running.
    pub fn is_playing(&self) -> bool {
        self.session.playback() == PlaybackState::Playing
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    pub fn len(&self) -> usize {
        self.session.len()
    }

    /// Playback and export controls are enabled only with scenes.
    pub fn has_scenes(&self) -> bool {
        !self.session.is_empty()
    }

    /// Pacing interval in milliseconds, for the page's timer.
    pub fn pacing_ms(&self) -> f64 {
        self.session.settings().pacing_seconds * 1000.0
    }

    /// JSON array of all scenes.
    pub fn scenes(&self) -> Result<String, JsError> {
        to_json(&self.session.scenes())
    }

    /// JSON object describing the current frame.
    pub fn frame(&self) -> Result<String, JsError> {
        to_json(&self.session.frame())
    }

    pub fn shot_list(&self) -> String {
        self.session.shot_list()
    }

    /// Pretty-printed JSON export of the storyboard.
    pub fn export_json(&self) -> Result<String, JsError> {
        self.session
            .export_json()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Narration request for the current scene as JSON, or `None` without
    /// scenes. `voices_json` is the browser's voice list:
    /// `[{"name": "Daniel", "lang": "en-GB"}, ...]`.
    pub fn narration(&self, voices_json: &str) -> Result<Option<String>, JsError> {
        let voices = parse_voices(voices_json)?;
        self.session
            .narration(&voices)
            .map(|req| to_json(&req))
            .transpose()
    }

    /// Filter the browser's voice list down to the ones worth offering.
    pub fn offered_voices(voices_json: &str) -> Result<String, JsError> {
        let voices = parse_voices(voices_json)?;
        to_json(&usable_voices(&voices))
    }

    pub fn set_style(&mut self, style: &str) -> Result<(), JsError> {
        let settings = Settings {
            style: Style::new(style),
            ..self.session.settings().clone()
        };
        self.apply(settings)
    }

    pub fn set_pacing(&mut self, seconds: f64) -> Result<(), JsError> {
        let settings = Settings {
            pacing_seconds: seconds,
            ..self.session.settings().clone()
        };
        self.apply(settings)
    }

    /// Takes effect on the next `generate`.
    pub fn set_scene_length(&mut self, length: &str) -> Result<(), JsError> {
        let settings = Settings {
            scene_length: SceneLength::from_name(length),
            ..self.session.settings().clone()
        };
        self.apply(settings)
    }

    pub fn set_voice(&mut self, voice: &str) -> Result<(), JsError> {
        let settings = Settings {
            voice: Some(voice.to_string()).filter(|v| !v.is_empty()),
            ..self.session.settings().clone()
        };
        self.apply(settings)
    }

    /// The bundled demo story.
    pub fn demo_story() -> String {
        DEMO_STORY.to_string()
    }

    /// Return JSON array of scene length names.
    pub fn scene_lengths() -> String {
        let names: Vec<&str> = SceneLength::ALL.iter().map(|l| l.name()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }
}

// Private helpers
impl Storymode {
    fn apply(&mut self, settings: Settings) -> Result<(), JsError> {
        self.session
            .set_settings(settings)
            .map_err(|e| JsError::new(&e.to_string()))
    }
}
