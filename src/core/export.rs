//! Storyboard exports: the plain-text shot list and the JSON payload.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::scene::Scene;
use crate::schema::settings::{SceneLength, Settings, Style};

/// Suggested file name for a downloaded shot list.
pub const SHOT_LIST_FILE_NAME: &str = "storymode_shotlist.txt";
/// Suggested file name for a downloaded JSON export.
pub const JSON_FILE_NAME: &str = "storymode_scenes.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render the shot list: one block per scene, blocks separated by a blank
/// line. An empty storyboard renders as an empty string.
pub fn shot_list(scenes: &[Scene], style: &Style) -> String {
    scenes
        .iter()
        .map(|sc| {
            format!(
                "SCENE {}\nTitle: {}\nStyle: {}\nVisual: {}\nCaption: {}\n---\n",
                sc.index, sc.title, style, sc.visual, sc.caption
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The JSON export: playback settings alongside the full scene list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub style: Style,
    pub pacing_seconds: f64,
    pub scene_length: SceneLength,
    pub scenes: Vec<Scene>,
}

impl ExportPayload {
    pub fn new(settings: &Settings, scenes: &[Scene]) -> Self {
        Self {
            style: settings.style.clone(),
            pacing_seconds: settings.pacing_seconds,
            scene_length: settings.scene_length,
            scenes: scenes.to_vec(),
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(input: &str) -> Result<ExportPayload, ExportError> {
        Ok(serde_json::from_str(input)?)
    }
}
