//! Segmentation: raw story text into ordered scene units.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::core::text::{split_sentences, trim_space};
use crate::schema::scene::SceneUnit;
use crate::schema::settings::SceneLength;

/// Fewer paragraphs than this and the text is re-split into sentence chunks.
pub const MIN_PARAGRAPH_SCENES: usize = 4;

/// A newline, optional whitespace, then one or more newlines.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[\s\x{FEFF}]*\n+").expect("valid regex"));

/// Split story text into scene units.
///
/// Paragraphs (blank-line separated) become units when there are at least
/// [`MIN_PARAGRAPH_SCENES`] of them. Otherwise the whole text is split into
/// sentences and grouped `length.chunk_size()` at a time. Blank input gives
/// no units.
pub fn segment(text: &str, length: SceneLength) -> Vec<SceneUnit> {
    let clean = text.replace('\r', "");
    let clean = trim_space(&clean);
    if clean.is_empty() {
        return Vec::new();
    }

    let paragraphs: Vec<String> = PARAGRAPH_BREAK
        .split(clean)
        .map(trim_space)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    let parts = if paragraphs.len() >= MIN_PARAGRAPH_SCENES {
        debug!(paragraphs = paragraphs.len(), "splitting on paragraphs");
        paragraphs
    } else {
        debug!(
            paragraphs = paragraphs.len(),
            chunk_size = length.chunk_size(),
            "too few paragraphs, chunking sentences"
        );
        chunk_sentences(clean, length.chunk_size())
    };

    parts
        .into_iter()
        .enumerate()
        .map(|(i, text)| SceneUnit::new(i + 1, text))
        .collect()
}

/// Group sentences `chunk_size` at a time, each group joined with a space.
fn chunk_sentences(text: &str, chunk_size: usize) -> Vec<String> {
    split_sentences(text)
        .chunks(chunk_size.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}
