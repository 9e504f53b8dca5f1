//! Storymode: turns freeform story text into a storyboard.
//!
//! Text is split into scene units on paragraph breaks (or sentence chunks
//! when the text has too few paragraphs), and each unit is annotated with a
//! title, summary, caption and keyword-driven visual prompt. The pipeline is
//! deterministic: the same text and length mode always give the same scenes.

pub mod core;
pub mod schema;

#[cfg(feature = "cli")]
pub mod cli;
