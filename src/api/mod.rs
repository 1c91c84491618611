//! Socket Mode event intake

pub mod event_handler;
pub mod listener;

// Re-export the main entry point for convenience
pub use listener::run_socket_mode;
