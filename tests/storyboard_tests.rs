/// Storyboard integration tests: text in, annotated scenes out.

use storymode::core::annotate::Annotator;
use storymode::core::export::ExportPayload;
use storymode::core::pipeline::storyboard;
use storymode::core::rules::FALLBACK_TAG;
use storymode::core::segment::segment;
use storymode::schema::scene::SceneUnit;
use storymode::schema::settings::{SceneLength, Settings};

fn assert_dense(indices: impl Iterator<Item = usize>) {
    for (pos, index) in indices.enumerate() {
        assert_eq!(index, pos + 1);
    }
}

#[test]
fn blank_inputs_give_empty_storyboards() {
    for length in SceneLength::ALL {
        assert!(storyboard("", length).is_empty());
        assert!(storyboard("   \n\n ", length).is_empty());
    }
}

#[test]
fn odd_inputs_never_fail() {
    let huge = "The rain kept falling. ".repeat(50_000);
    let inputs = [
        "x",
        ".",
        "?!",
        "\n\n\n\n",
        "no punctuation at all",
        "emoji 🎬 only",
        "a\n\nb\n\nc\n\nd\n\ne",
        huge.as_str(),
    ];
    for input in inputs {
        for length in SceneLength::ALL {
            let scenes = storyboard(input, length);
            assert_dense(scenes.iter().map(|s| s.index));
            for scene in &scenes {
                assert!(!scene.text.trim().is_empty());
            }
        }
    }
}

#[test]
fn paragraphs_become_scenes_verbatim() {
    let paragraphs = [
        "The station was empty.",
        "A train arrived.\nNobody got off.",
        "Rain started.",
        "She waited anyway!",
        "Then, at last, the whistle.",
    ];
    let text = paragraphs.join("\n\n   \n");
    let scenes = storyboard(&text, SceneLength::Short);
    assert_eq!(scenes.len(), paragraphs.len());
    for (scene, paragraph) in scenes.iter().zip(paragraphs) {
        assert_eq!(scene.text, paragraph);
    }
    assert_dense(scenes.iter().map(|s| s.index));
}

#[test]
fn single_paragraph_is_chunked_by_length() {
    for (length, sentences) in [
        (SceneLength::Short, 7),
        (SceneLength::Medium, 11),
        (SceneLength::Long, 16),
    ] {
        let chunk = length.chunk_size();
        assert!(sentences >= chunk * 2);
        let text = (1..=sentences)
            .map(|i| format!("Line number {i} happens."))
            .collect::<Vec<_>>()
            .join(" ");
        let scenes = storyboard(&text, length);
        assert_eq!(scenes.len(), sentences.div_ceil(chunk));
        assert_eq!(
            scenes[0].text,
            (1..=chunk)
                .map(|i| format!("Line number {i} happens."))
                .collect::<Vec<_>>()
                .join(" ")
        );
    }
}

#[test]
fn summary_truncation() {
    let short = "s".repeat(220);
    let long = "l".repeat(500);
    let text = format!("{short}\n\n{long}\n\nthird\n\nfourth");
    let scenes = storyboard(&text, SceneLength::Medium);
    assert_eq!(scenes[0].summary, short);
    assert_eq!(scenes[1].summary.chars().count(), 221);
    assert_eq!(scenes[1].summary, format!("{}…", "l".repeat(220)));
}

#[test]
fn visual_tags_follow_table_order() {
    let annotator = Annotator::default();
    for text in [
        "The DOOR slammed as RAIN fell.",
        "rain then door",
        "Door first, rain after.",
    ] {
        let scene = annotator.annotate(&SceneUnit::new(1, text));
        assert_eq!(scene.visual, "rainy atmosphere, mysterious door");
    }
}

#[test]
fn no_keywords_gives_fallback_tag() {
    let scene = Annotator::default().annotate(&SceneUnit::new(1, "A bright sunny field."));
    assert_eq!(scene.visual, FALLBACK_TAG);
    assert_eq!(scene.visual, "story-driven scene");
}

#[test]
fn rain_and_door_paragraphs_annotate_as_expected() {
    let annotator = Annotator::default();

    let first = annotator.annotate(&SceneUnit::new(1, "Rain fell."));
    assert_eq!(first.title, "Rain fell.");
    assert_eq!(first.caption, "Rain fell.");
    assert_eq!(first.visual, "rainy atmosphere");

    let second = annotator.annotate(&SceneUnit::new(2, "A door creaked open in the alley."));
    assert_eq!(second.title, "A door creaked open in the alley.");
    assert_eq!(second.caption, "A door creaked open in the alley.");
    assert_eq!(second.visual, "narrow alley, mysterious door");
}

#[test]
fn rain_and_door_story_with_enough_paragraphs() {
    let text = "Rain fell.\n\nA door creaked open in the alley.\n\nShe waited.\n\nNothing moved.";
    let scenes = storyboard(text, SceneLength::Medium);
    assert_eq!(scenes.len(), 4);
    assert_eq!(scenes[0].visual, "rainy atmosphere");
    assert_eq!(scenes[1].visual, "narrow alley, mysterious door");
    assert_eq!(scenes[2].visual, FALLBACK_TAG);
}

#[test]
fn two_short_paragraphs_collapse_into_one_scene() {
    let scenes = storyboard("Rain fell.\n\nA door creaked open in the alley.", SceneLength::Short);
    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].text, "Rain fell. A door creaked open in the alley.");
    assert_eq!(scenes[0].caption, "Rain fell.");
    assert_eq!(scenes[0].visual, "rainy atmosphere, narrow alley, mysterious door");
}

#[test]
fn segment_and_annotate_agree() {
    let text = "One.\n\nTwo.\n\nThree.\n\nFour.";
    let units = segment(text, SceneLength::Long);
    let annotator = Annotator::default();
    let by_hand: Vec<_> = units.iter().map(|u| annotator.annotate(u)).collect();
    assert_eq!(by_hand, storyboard(text, SceneLength::Long));
}

#[test]
fn json_export_round_trips_every_scene() {
    let text = storymode::core::demo::DEMO_STORY;
    let scenes = storyboard(text, SceneLength::Medium);
    let json = ExportPayload::new(&Settings::default(), &scenes)
        .to_json()
        .unwrap();
    let parsed = ExportPayload::from_json(&json).unwrap();
    assert_eq!(parsed.scenes.len(), scenes.len());
    for (a, b) in parsed.scenes.iter().zip(&scenes) {
        assert_eq!(a.index, b.index);
        assert_eq!(a.title, b.title);
        assert_eq!(a.text, b.text);
        assert_eq!(a.summary, b.summary);
        assert_eq!(a.caption, b.caption);
        assert_eq!(a.visual, b.visual);
    }
}
