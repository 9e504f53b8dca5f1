//! Narration requests handed to a text-to-speech backend.
//!
//! The core never speaks; it only decides what to say, how fast, and with
//! which of the available voices.

use serde::{Deserialize, Serialize};

use crate::schema::scene::Scene;
use crate::schema::settings::Style;

/// A voice offered by the speech backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub name: String,
    /// BCP 47 language tag, e.g. `en-GB`.
    #[serde(default)]
    pub lang: String,
}

/// What to speak for one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationRequest {
    pub text: String,
    pub rate: f32,
    pub voice: Option<String>,
}

impl NarrationRequest {
    /// Narrate the full scene text at the style's rate. The voice is kept
    /// only if the backend actually offers it.
    pub fn for_scene(
        scene: &Scene,
        style: &Style,
        voice: Option<&str>,
        available: &[VoiceInfo],
    ) -> Self {
        Self {
            text: scene.text.clone(),
            rate: style.narration_rate(),
            voice: voice
                .and_then(|name| find_voice(available, name))
                .map(|v| v.name.clone()),
        }
    }
}

/// Voices to offer the user: English ones when there are any, otherwise all.
pub fn usable_voices(voices: &[VoiceInfo]) -> Vec<&VoiceInfo> {
    let english: Vec<&VoiceInfo> = voices
        .iter()
        .filter(|v| v.lang.to_lowercase().starts_with("en"))
        .collect();
    if english.is_empty() {
        voices.iter().collect()
    } else {
        english
    }
}

/// Look up a voice by exact name.
pub fn find_voice<'a>(voices: &'a [VoiceInfo], name: &str) -> Option<&'a VoiceInfo> {
    voices.iter().find(|v| v.name == name)
}
