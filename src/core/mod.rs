pub mod annotate;
pub mod demo;
pub mod export;
pub mod narration;
pub mod pipeline;
pub mod rules;
pub mod segment;
pub mod session;
pub mod text;
