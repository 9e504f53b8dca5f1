//! Text helpers shared by segmentation and annotation.

use regex::Regex;
use std::sync::LazyLock;

/// Appended to text cut short by [`truncate_chars`].
pub const ELLIPSIS: char = '…';

/// Byte order mark. Counted as whitespace alongside Unicode `White_Space`.
pub const BOM: char = '\u{FEFF}';

/// Sentence-ending punctuation followed by whitespace. The punctuation is
/// always a single ASCII byte.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?][\s\x{FEFF}]+").expect("valid regex"));

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == BOM
}

/// Trim whitespace, including byte order marks, from both ends.
pub fn trim_space(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// Split text into sentences.
///
/// A break falls right after `.`, `!` or `?` when whitespace follows. The
/// punctuation stays with the sentence before it and the whitespace run is
/// dropped. Sentences are trimmed and empty ones skipped, so text with no
/// terminal punctuation comes back as a single sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK.find_iter(text) {
        pieces.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(trim_space)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Cap `text` at `max` characters, appending [`ELLIPSIS`] when cut.
///
/// Counts Unicode scalar values, not graphemes, so a combining sequence can
/// be split at the boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&text[..cut]);
            out.push(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}

/// First `max` characters of `text`, without any marker.
pub fn take_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
