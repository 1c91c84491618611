//! All AI/LLM functionality

pub mod client;
pub mod prompt_builder;
pub mod summarizer;

// Re-export main types for convenience
pub use client::{GeminiClient, TextGenerator, estimate_tokens};
pub use summarizer::{LONG_DOCUMENT_THRESHOLD, MAX_SECTIONS, Summarizer};
