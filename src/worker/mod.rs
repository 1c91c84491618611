//! Mention handling: parse, fetch, summarize, reply

pub mod deliver;
pub mod handler;
pub mod summarize;

// Re-export the main handler for convenience
pub use handler::{DispatchOutcome, Dispatcher};
