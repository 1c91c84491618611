//! All Slack-specific functionality

pub mod client;
pub mod command_parser;
pub mod message_formatter;

// Re-export main types for convenience
pub use client::{MessagePoster, SlackClient, new_hyper_client};
pub use command_parser::{Command, parse_command};
