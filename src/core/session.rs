//! Preview session: the current storyboard, position and playback state.
//!
//! The session owns everything that changes while a user works with a
//! storyboard. It has no timers of its own: the host calls [`Session::tick`]
//! once per pacing interval.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::export::{self, ExportError, ExportPayload};
use crate::core::narration::{NarrationRequest, VoiceInfo};
use crate::core::pipeline::StoryboardEngine;
use crate::core::text::trim_space;
use crate::schema::scene::Scene;
use crate::schema::settings::{Settings, SettingsError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no story text provided")]
    NoStoryText,
    #[error("storyboard is empty")]
    EmptyStoryboard,
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// What the preview frame shows for the current position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub style_tag: String,
    pub title: String,
    pub description: String,
    pub caption: String,
    pub meta: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    engine: StoryboardEngine,
    settings: Settings,
    scenes: Vec<Scene>,
    current: usize,
    playback: PlaybackState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(StoryboardEngine::default(), Settings::default())
    }
}

impl Session {
    pub fn new(engine: StoryboardEngine, settings: Settings) -> Self {
        Self {
            engine,
            settings,
            scenes: Vec::new(),
            current: 0,
            playback: PlaybackState::Stopped,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. Takes effect on the next generate, frame or
    /// export; the current scenes are kept.
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), SessionError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        self.scenes.get(self.current)
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Build a new storyboard from `text`, replacing the old one wholesale.
    ///
    /// Returns the number of scenes. Blank text is rejected before the
    /// pipeline runs and leaves the current storyboard untouched.
    pub fn generate(&mut self, text: &str) -> Result<usize, SessionError> {
        let text = trim_space(text);
        if text.is_empty() {
            return Err(SessionError::NoStoryText);
        }

        let scenes = self.engine.storyboard(text, self.settings.scene_length);
        self.playback = PlaybackState::Stopped;
        self.scenes = scenes;
        self.current = 0;
        info!(
            scenes = self.scenes.len(),
            length = %self.settings.scene_length,
            "generated storyboard"
        );
        Ok(self.scenes.len())
    }

    /// Drop the storyboard and stop playback.
    pub fn reset(&mut self) {
        self.playback = PlaybackState::Stopped;
        self.scenes.clear();
        self.current = 0;
        debug!("session reset");
    }

    /// Jump to a scene (0-based), clamped to the storyboard. Stops playback.
    pub fn go_to(&mut self, index: usize) {
        self.playback = PlaybackState::Stopped;
        self.current = index.min(self.scenes.len().saturating_sub(1));
    }

    pub fn next(&mut self) {
        self.go_to(self.current + 1);
    }

    pub fn previous(&mut self) {
        self.go_to(self.current.saturating_sub(1));
    }

    /// Start or resume playback. Does nothing without scenes.
    pub fn play(&mut self) {
        if self.scenes.is_empty() {
            return;
        }
        self.playback = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if self.playback == PlaybackState::Playing {
            self.playback = PlaybackState::Paused;
        }
    }

    /// Stop playback and rewind to the first scene.
    pub fn stop(&mut self) {
        self.playback = PlaybackState::Stopped;
        self.current = 0;
    }

    /// Advance one pacing interval. Returns whether the frame changed.
    ///
    /// Playback stops on the last scene, which stays on screen.
    pub fn tick(&mut self) -> bool {
        if self.playback != PlaybackState::Playing {
            return false;
        }
        if self.current + 1 >= self.scenes.len() {
            self.playback = PlaybackState::Stopped;
            debug!("playback reached the last scene");
            return false;
        }
        self.current += 1;
        true
    }

    pub fn frame(&self) -> Frame {
        let style_tag = self.settings.style.tag();
        match self.current_scene() {
            None => Frame {
                style_tag,
                title: "No storyboard yet".to_string(),
                description: "Generate scenes to preview your story.".to_string(),
                caption: "—".to_string(),
                meta: "Scene 0 / 0".to_string(),
            },
            Some(sc) => Frame {
                style_tag,
                title: format!("Scene {}: {}", sc.index, sc.title),
                description: sc.visual.clone(),
                caption: sc.caption.clone(),
                meta: format!("Scene {} / {}", self.current + 1, self.scenes.len()),
            },
        }
    }

    /// Shot list for the current storyboard; empty when there are no scenes.
    pub fn shot_list(&self) -> String {
        export::shot_list(&self.scenes, &self.settings.style)
    }

    pub fn export_payload(&self) -> Result<ExportPayload, SessionError> {
        if self.scenes.is_empty() {
            return Err(SessionError::EmptyStoryboard);
        }
        Ok(ExportPayload::new(&self.settings, &self.scenes))
    }

    pub fn export_json(&self) -> Result<String, SessionError> {
        Ok(self.export_payload()?.to_json()?)
    }

    /// Narration for the current scene using the configured voice.
    pub fn narration(&self, voices: &[VoiceInfo]) -> Option<NarrationRequest> {
        self.current_scene().map(|sc| {
            NarrationRequest::for_scene(
                sc,
                &self.settings.style,
                self.settings.voice.as_deref(),
                voices,
            )
        })
    }
}
