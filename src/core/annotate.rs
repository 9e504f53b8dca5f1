//! Scene annotation: title, summary, caption and visual prompt per unit.

use crate::core::rules::VisualRuleSet;
use crate::core::text::{split_sentences, take_chars, trim_space, truncate_chars};
use crate::schema::scene::{Scene, SceneUnit};

pub const TITLE_MAX_CHARS: usize = 48;
pub const SUMMARY_MAX_CHARS: usize = 220;
pub const CAPTION_MAX_CHARS: usize = 110;

/// Attaches metadata to scene units using a visual rule table.
///
/// Annotation holds no state between calls, so units can be annotated in
/// any order.
#[derive(Debug, Clone)]
pub struct Annotator {
    rules: VisualRuleSet,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(VisualRuleSet::builtin())
    }
}

impl Annotator {
    pub fn new(rules: VisualRuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &VisualRuleSet {
        &self.rules
    }

    pub fn annotate(&self, unit: &SceneUnit) -> Scene {
        Scene {
            index: unit.index,
            title: title(&unit.text, unit.index),
            text: unit.text.clone(),
            summary: summary(&unit.text),
            caption: caption(&unit.text),
            visual: self.rules.visual_prompt(&unit.text),
        }
    }
}

/// First physical line, capped. Blank lines fall back to `Scene {index}`.
pub fn title(text: &str, index: usize) -> String {
    let first_line = text.split('\n').next().unwrap_or_default();
    let title = take_chars(first_line, TITLE_MAX_CHARS);
    if trim_space(title).is_empty() {
        format!("Scene {index}")
    } else {
        title.to_string()
    }
}

pub fn summary(text: &str) -> String {
    truncate_chars(text, SUMMARY_MAX_CHARS)
}

/// Leading sentence of the first non-blank line, capped.
pub fn caption(text: &str) -> String {
    let line = text
        .split('\n')
        .map(trim_space)
        .find(|l| !l.is_empty())
        .unwrap_or_default();
    let sentence = split_sentences(line).first().copied().unwrap_or(line);
    truncate_chars(sentence, CAPTION_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotate(index: usize, text: &str) -> Scene {
        Annotator::default().annotate(&SceneUnit::new(index, text))
    }

    #[test]
    fn single_line_unit() {
        let scene = annotate(1, "Rain fell.");
        assert_eq!(scene.index, 1);
        assert_eq!(scene.title, "Rain fell.");
        assert_eq!(scene.caption, "Rain fell.");
        assert_eq!(scene.summary, "Rain fell.");
        assert_eq!(scene.text, "Rain fell.");
        assert_eq!(scene.visual, "rainy atmosphere");
    }

    #[test]
    fn door_and_alley_in_table_order() {
        let scene = annotate(2, "A door creaked open in the alley.");
        assert_eq!(scene.title, "A door creaked open in the alley.");
        assert_eq!(scene.caption, "A door creaked open in the alley.");
        assert_eq!(scene.visual, "narrow alley, mysterious door");
    }

    #[test]
    fn title_is_first_line_capped() {
        let long = "x".repeat(60);
        assert_eq!(title(&format!("{long}\nrest"), 1), "x".repeat(48));
        assert_eq!(title("Chapter 1\nBody text.", 1), "Chapter 1");
    }

    #[test]
    fn blank_title_falls_back() {
        assert_eq!(title("", 4), "Scene 4");
        assert_eq!(title("   \nbody", 2), "Scene 2");
    }

    #[test]
    fn title_has_no_ellipsis() {
        let t = title(&"y".repeat(100), 1);
        assert_eq!(t.chars().count(), 48);
        assert!(!t.ends_with('…'));
    }

    #[test]
    fn summary_truncates_past_limit() {
        let text = "a".repeat(221);
        let s = summary(&text);
        assert_eq!(s.chars().count(), 221);
        assert!(s.ends_with('…'));
        assert_eq!(&s[..220], "a".repeat(220));
    }

    #[test]
    fn summary_keeps_text_at_limit() {
        let text = "b".repeat(220);
        assert_eq!(summary(&text), text);
    }

    #[test]
    fn caption_is_first_sentence_of_first_line() {
        let text = "Chapter 1: The Door\nRain painted the street. Mira ran.";
        assert_eq!(caption(text), "Chapter 1: The Door");
        assert_eq!(caption("Rain painted the street. Mira ran."), "Rain painted the street.");
    }

    #[test]
    fn caption_skips_blank_lines() {
        assert_eq!(caption("\n   \n  Hello there. Bye."), "Hello there.");
    }

    #[test]
    fn caption_is_capped() {
        let sentence = format!("{}.", "w".repeat(150));
        let c = caption(&sentence);
        assert_eq!(c.chars().count(), 111);
        assert!(c.ends_with('…'));
    }

    #[test]
    fn caption_of_blank_text_is_empty() {
        assert_eq!(caption(""), "");
    }

    #[test]
    fn custom_rules_drive_visual() {
        let annotator = Annotator::new(
            VisualRuleSet::parse_ron(r#"[(keywords: ["ship"], tag: "open sea")]"#).unwrap(),
        );
        let scene = annotator.annotate(&SceneUnit::new(1, "The ship left the door."));
        assert_eq!(scene.visual, "open sea");
    }
}
