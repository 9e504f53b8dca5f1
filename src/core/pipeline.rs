//! The storyboard pipeline: Text → Scene units → Scenes.
//!
//! Wires segmentation to annotation with a configurable visual rule table.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::annotate::Annotator;
use crate::core::rules::{RuleError, VisualRuleSet};
use crate::core::segment::segment;
use crate::schema::scene::Scene;
use crate::schema::settings::{SceneLength, Settings};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to load visual rules from {}: {source}", path.display())]
    Rules {
        path: PathBuf,
        #[source]
        source: RuleError,
    },
}

/// Generate a storyboard with the built-in visual rules.
pub fn storyboard(text: &str, length: SceneLength) -> Vec<Scene> {
    StoryboardEngine::default().storyboard(text, length)
}

/// Segments and annotates story text. Built via `StoryboardEngine::builder()`.
#[derive(Debug, Clone, Default)]
pub struct StoryboardEngine {
    annotator: Annotator,
}

/// Builder for constructing a `StoryboardEngine`.
pub struct StoryboardEngineBuilder {
    builtin: bool,
    /// Directly provided rule tables, appended in order.
    rule_sets: Vec<VisualRuleSet>,
    /// RON rule files, appended after `rule_sets`.
    rule_files: Vec<PathBuf>,
}

impl StoryboardEngine {
    pub fn builder() -> StoryboardEngineBuilder {
        StoryboardEngineBuilder {
            builtin: true,
            rule_sets: Vec::new(),
            rule_files: Vec::new(),
        }
    }

    /// Engine using the built-in rules plus any rule files named in settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, PipelineError> {
        settings
            .rules
            .iter()
            .fold(Self::builder(), |b, path| b.rules_file(path))
            .build()
    }

    pub fn rules(&self) -> &VisualRuleSet {
        self.annotator.rules()
    }

    /// Split `text` into scenes and annotate each one.
    ///
    /// Never fails: blank text yields an empty storyboard.
    pub fn storyboard(&self, text: &str, length: SceneLength) -> Vec<Scene> {
        let scenes: Vec<Scene> = segment(text, length)
            .iter()
            .map(|unit| self.annotator.annotate(unit))
            .collect();
        debug!(scenes = scenes.len(), length = %length, "storyboard generated");
        scenes
    }
}

impl StoryboardEngineBuilder {
    /// Start from an empty rule table instead of the built-in one.
    pub fn without_builtin_rules(mut self) -> Self {
        self.builtin = false;
        self
    }

    pub fn with_rules(mut self, rules: VisualRuleSet) -> Self {
        self.rule_sets.push(rules);
        self
    }

    pub fn rules_file(mut self, path: impl AsRef<Path>) -> Self {
        self.rule_files.push(path.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> Result<StoryboardEngine, PipelineError> {
        let mut rules = if self.builtin {
            VisualRuleSet::builtin()
        } else {
            VisualRuleSet::default()
        };

        for set in self.rule_sets {
            rules.merge(set);
        }

        for path in self.rule_files {
            let loaded = VisualRuleSet::load_from_ron(&path).map_err(|source| {
                PipelineError::Rules {
                    path: path.clone(),
                    source,
                }
            })?;
            debug!(path = %path.display(), rules = loaded.len(), "loaded visual rules");
            rules.merge(loaded);
        }

        Ok(StoryboardEngine {
            annotator: Annotator::new(rules),
        })
    }
}
