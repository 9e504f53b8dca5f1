use serde::{Deserialize, Serialize};

/// A contiguous run of source text assigned one position in the storyboard,
/// before any metadata is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneUnit {
    /// 1-based position in emission order.
    pub index: usize,
    /// Trimmed, non-empty source text.
    pub text: String,
}

impl SceneUnit {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// One annotated scene of a storyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// 1-based position in the storyboard.
    pub index: usize,
    /// First line of the unit, capped at 48 characters.
    pub title: String,
    /// Full unit text, kept verbatim for narration.
    pub text: String,
    /// `text` capped at 220 characters.
    pub summary: String,
    /// Leading sentence of the first non-blank line.
    pub caption: String,
    /// Comma-joined visual prompt tags.
    pub visual: String,
}
