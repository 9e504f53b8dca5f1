//! Generation and playback settings: length mode, style, pacing, voice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("pacing must be a positive number of seconds that fits a duration, got {0}")]
    InvalidPacing(f64),
}

/// How many sentences go into one scene when the text has too few
/// paragraphs to split on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SceneLength {
    pub const ALL: [SceneLength; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Sentences per chunk on the sentence fallback path.
    pub fn chunk_size(&self) -> usize {
        match self {
            Self::Short => 3,
            Self::Medium => 5,
            Self::Long => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Parse a length name. Anything unrecognised falls back to `Long`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "short" => Self::Short,
            "medium" => Self::Medium,
            _ => Self::Long,
        }
    }
}

impl fmt::Display for SceneLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Presentation style chosen by the user (e.g. `cinematic`, `kids`, `noir`).
///
/// The style never changes segmentation; it is stamped onto exports, shown
/// on the preview frame, and picks the narration rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(pub String);

impl Style {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label shown in the corner of the preview frame.
    pub fn tag(&self) -> String {
        self.0.to_uppercase()
    }

    /// Speech rate multiplier for narration in this style.
    pub fn narration_rate(&self) -> f32 {
        match self.0.as_str() {
            "kids" => 1.05,
            "noir" => 0.95,
            _ => 1.0,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new("cinematic")
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a session needs besides the story text itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub style: Style,
    /// Seconds each scene stays on screen during playback.
    pub pacing_seconds: f64,
    pub scene_length: SceneLength,
    /// Preferred narration voice name.
    pub voice: Option<String>,
    /// Extra visual rule files appended after the built-in table.
    pub rules: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: Style::default(),
            pacing_seconds: 4.0,
            scene_length: SceneLength::default(),
            voice: None,
            rules: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse settings from a RON string and validate them.
    pub fn parse_ron(input: &str) -> Result<Settings, SettingsError> {
        let settings: Settings = ron::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Settings, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_pacing(self.pacing_seconds)
    }

    /// Playback interval between scenes.
    pub fn pacing_interval(&self) -> Result<Duration, SettingsError> {
        pacing_interval(self.pacing_seconds)
    }
}

pub fn validate_pacing(seconds: f64) -> Result<(), SettingsError> {
    pacing_interval(seconds).map(|_| ())
}

/// Convert pacing seconds to a [`Duration`]; rejects non-positive values and
/// values too large to represent.
pub fn pacing_interval(seconds: f64) -> Result<Duration, SettingsError> {
    if seconds.is_nan() || seconds <= 0.0 {
        return Err(SettingsError::InvalidPacing(seconds));
    }
    Duration::try_from_secs_f64(seconds).map_err(|_| SettingsError::InvalidPacing(seconds))
}
