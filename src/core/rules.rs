//! Visual rule table: keyword groups mapped to visual prompt tags.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Emitted when no rule matches.
pub const FALLBACK_TAG: &str = "story-driven scene";

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// A keyword group and the tag it contributes when any keyword appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualRule {
    pub keywords: Vec<String>,
    pub tag: String,
}

impl VisualRule {
    /// Build a rule; keywords are lowercased so matching is case-insensitive.
    pub fn new<K, S>(keywords: K, tag: impl Into<String>) -> Self
    where
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            tag: tag.into(),
        }
    }

    /// Whether any keyword is a substring of `lowered` (already lowercase).
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && lowered.contains(k.as_str()))
    }
}

/// Ordered rule table. Earlier rules come first in the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualRuleSet {
    pub rules: Vec<VisualRule>,
}

impl VisualRuleSet {
    /// The built-in table.
    pub fn builtin() -> Self {
        let table: [(&[&str], &str); 7] = [
            (&["rain", "storm"], "rainy atmosphere"),
            (&["alley"], "narrow alley"),
            (&["door"], "mysterious door"),
            (&["cinema", "movie"], "cinematic lighting"),
            (&["kitchen"], "kitchen interior"),
            (&["toaster"], "toaster on counter"),
            (&["whisper", "voice"], "whispering presence"),
        ];
        Self {
            rules: table
                .iter()
                .map(|(keywords, tag)| VisualRule::new(keywords.iter(), *tag))
                .collect(),
        }
    }

    /// Parse a rule table from RON: a list of `(keywords: [..], tag: "..")`.
    pub fn parse_ron(input: &str) -> Result<VisualRuleSet, RuleError> {
        let rules: Vec<VisualRule> = ron::from_str(input)?;
        Ok(Self {
            rules: rules
                .into_iter()
                .map(|r| VisualRule::new(r.keywords, r.tag))
                .collect(),
        })
    }

    /// Load a rule table from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<VisualRuleSet, RuleError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Load every `.ron` file under `dir`, recursing in sorted path order.
    /// Files and directories that cannot be read or parsed are reported in
    /// [`RuleDirLoad::failures`] instead of aborting the walk.
    pub fn load_dir(dir: &Path) -> RuleDirLoad {
        let mut load = RuleDirLoad::default();
        load_dir_into(dir, &mut load);
        load
    }

    /// Append another table's rules after this one's.
    pub fn merge(&mut self, other: VisualRuleSet) {
        self.rules.extend(other.rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tags of every rule matching `text`, in table order.
    pub fn matching_tags(&self, text: &str) -> Vec<&str> {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.matches(&lowered))
            .map(|rule| rule.tag.as_str())
            .collect()
    }

    /// The visual prompt for `text`: matched tags joined with `", "`, or
    /// [`FALLBACK_TAG`] when nothing matches.
    pub fn visual_prompt(&self, text: &str) -> String {
        let tags = self.matching_tags(text);
        if tags.is_empty() {
            FALLBACK_TAG.to_string()
        } else {
            tags.join(", ")
        }
    }

    /// Check the table for rules that can never fire or always co-fire.
    pub fn lint(&self) -> RuleLint {
        let mut lint = RuleLint::default();
        let mut keyword_owner: FxHashMap<&str, usize> = FxHashMap::default();
        let mut seen_tags: FxHashSet<&str> = FxHashSet::default();

        for (i, rule) in self.rules.iter().enumerate() {
            let label = format!("rule {} ('{}')", i + 1, rule.tag);

            if rule.tag.trim().is_empty() {
                lint.errors.push(format!("rule {} has a blank tag", i + 1));
            } else if !seen_tags.insert(rule.tag.as_str()) {
                lint.warnings
                    .push(format!("{label} repeats a tag used by an earlier rule"));
            }

            if rule.keywords.is_empty() {
                lint.errors.push(format!("{label} has no keywords"));
            }

            for keyword in &rule.keywords {
                if keyword.trim().is_empty() {
                    lint.errors.push(format!("{label} has a blank keyword"));
                    continue;
                }
                match keyword_owner.get(keyword.as_str()) {
                    Some(&owner) if owner != i => lint.warnings.push(format!(
                        "{label} reuses keyword '{keyword}' from rule {}",
                        owner + 1
                    )),
                    Some(_) => lint
                        .warnings
                        .push(format!("{label} lists keyword '{keyword}' twice")),
                    None => {
                        keyword_owner.insert(keyword.as_str(), i);
                    }
                }
            }
        }

        // A keyword containing another rule's keyword fires both rules.
        let mut owners: Vec<(&str, usize)> = keyword_owner.into_iter().collect();
        owners.sort_unstable();
        for &(long, long_owner) in &owners {
            for &(short, short_owner) in &owners {
                if long_owner != short_owner && long != short && long.contains(short) {
                    lint.warnings.push(format!(
                        "keyword '{long}' (rule {}) always also matches '{short}' (rule {})",
                        long_owner + 1,
                        short_owner + 1
                    ));
                }
            }
        }

        lint
    }
}

/// Findings from [`VisualRuleSet::lint`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleLint {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl RuleLint {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Result of [`VisualRuleSet::load_dir`].
#[derive(Debug, Default)]
pub struct RuleDirLoad {
    pub rules: VisualRuleSet,
    /// Each loaded file and its rule count, in load order.
    pub loaded: Vec<(PathBuf, usize)>,
    pub failures: Vec<(PathBuf, RuleError)>,
}

fn load_dir_into(dir: &Path, load: &mut RuleDirLoad) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            load.failures.push((dir.to_path_buf(), e.into()));
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            load_dir_into(&path, load);
        } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            match VisualRuleSet::load_from_ron(&path) {
                Ok(set) => {
                    load.loaded.push((path, set.len()));
                    load.rules.merge(set);
                }
                Err(e) => load.failures.push((path, e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_seven_rules() {
        assert_eq!(VisualRuleSet::builtin().len(), 7);
    }

    #[test]
    fn builtin_order_is_fixed() {
        let rules = VisualRuleSet::builtin();
        assert_eq!(
            rules.visual_prompt("The door swung open in the rain."),
            "rainy atmosphere, mysterious door"
        );
    }

    #[test]
    fn matching_ignores_case() {
        let rules = VisualRuleSet::builtin();
        assert_eq!(rules.visual_prompt("STORM over the CINEMA"), "rainy atmosphere, cinematic lighting");
    }

    #[test]
    fn each_rule_fires_once() {
        let rules = VisualRuleSet::builtin();
        assert_eq!(rules.visual_prompt("rain, storm, rain"), "rainy atmosphere");
    }

    #[test]
    fn substring_matches_count() {
        // "doorway" contains "door", "brainstorm" contains both rain and storm
        let rules = VisualRuleSet::builtin();
        assert_eq!(rules.visual_prompt("a doorway"), "mysterious door");
        assert_eq!(rules.visual_prompt("brainstorm"), "rainy atmosphere");
    }

    #[test]
    fn no_match_uses_fallback() {
        let rules = VisualRuleSet::builtin();
        assert_eq!(rules.visual_prompt("A quiet field."), FALLBACK_TAG);
        assert_eq!(VisualRuleSet::default().visual_prompt("rain"), FALLBACK_TAG);
    }

    #[test]
    fn all_builtin_tags_in_order() {
        let rules = VisualRuleSet::builtin();
        let text = "whisper toaster kitchen movie door alley rain";
        assert_eq!(
            rules.visual_prompt(text),
            "rainy atmosphere, narrow alley, mysterious door, cinematic lighting, \
             kitchen interior, toaster on counter, whispering presence"
        );
    }

    #[test]
    fn parse_ron_lowercases_keywords() {
        let rules = VisualRuleSet::parse_ron(
            r#"[
                (keywords: ["Forest", "TREES"], tag: "deep woods"),
            ]"#,
        )
        .unwrap();
        assert_eq!(rules.rules[0].keywords, vec!["forest", "trees"]);
        assert_eq!(rules.visual_prompt("Tall trees."), "deep woods");
    }

    #[test]
    fn merge_appends_after_existing() {
        let mut rules = VisualRuleSet::builtin();
        rules.merge(VisualRuleSet {
            rules: vec![VisualRule::new(["moon"], "moonlit sky")],
        });
        assert_eq!(rules.len(), 8);
        assert_eq!(
            rules.visual_prompt("The moon over the alley."),
            "narrow alley, moonlit sky"
        );
    }

    #[test]
    fn empty_keyword_never_matches() {
        let rules = VisualRuleSet {
            rules: vec![VisualRule::new([""], "everything")],
        };
        assert_eq!(rules.visual_prompt("anything"), FALLBACK_TAG);
    }

    #[test]
    fn builtin_lints_clean() {
        let lint = VisualRuleSet::builtin().lint();
        assert!(lint.is_clean(), "{lint:?}");
    }

    #[test]
    fn lint_reports_errors() {
        let rules = VisualRuleSet {
            rules: vec![
                VisualRule::new(Vec::<String>::new(), "empty"),
                VisualRule::new(["  "], "blank keyword"),
                VisualRule::new(["x"], " "),
            ],
        };
        let lint = rules.lint();
        assert_eq!(lint.errors.len(), 3);
    }

    #[test]
    fn lint_reports_overlaps() {
        let mut rules = VisualRuleSet::builtin();
        rules.merge(VisualRuleSet {
            rules: vec![
                VisualRule::new(["rainbow"], "rainbow sky"),
                VisualRule::new(["door"], "mysterious door"),
            ],
        });
        let lint = rules.lint();
        assert!(lint.errors.is_empty());
        assert!(lint.warnings.iter().any(|w| w.contains("'rainbow'")));
        assert!(lint.warnings.iter().any(|w| w.contains("reuses keyword 'door'")));
        assert!(lint.warnings.iter().any(|w| w.contains("repeats a tag")));
    }
}
