//! Bundled demo story.

/// A short two-chapter story that exercises every built-in visual rule.
pub const DEMO_STORY: &str = "Chapter 1: The Door in the Alley

Rain painted the street in silver. Mira pulled her hood tighter and stepped into the alley behind the old cinema.
A faint glow leaked from a door that wasn't there yesterday.

She touched the handle. Warm. Like it had been waiting.
The door opened into a hallway lined with movie posters—except the posters moved, alive with scenes from stories she’d never read.

A voice whispered: “Pick your story… and watch it become real.”

Mira chose a poster titled STORYMODE.

The hallway flickered. The world rewrote itself.

Chapter 2: The First Scene

A kitchen. A toaster on the counter. A note: “Begin.”
Mira realized the stories weren’t just playing—they were responding to her choices.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::storyboard;
    use crate::schema::settings::SceneLength;

    #[test]
    fn demo_splits_on_paragraphs() {
        let scenes = storyboard(DEMO_STORY, SceneLength::Medium);
        assert_eq!(scenes.len(), 8);
        assert_eq!(scenes[0].title, "Chapter 1: The Door in the Alley");
        assert_eq!(scenes[0].visual, "narrow alley, mysterious door");
        assert_eq!(scenes[6].title, "Chapter 2: The First Scene");
    }

    #[test]
    fn demo_kitchen_scene() {
        let scenes = storyboard(DEMO_STORY, SceneLength::Short);
        let last = scenes.last().unwrap();
        assert_eq!(last.caption, "A kitchen.");
        assert_eq!(last.visual, "kitchen interior, toaster on counter");
    }
}
