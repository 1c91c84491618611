/// esa Document Summarizer - a Slack bot that summarizes esa posts with Gemini.
///
/// Mention the bot with an esa post URL and it replies in the same channel
/// with a summary:
///
/// 1. The mention text is parsed for a URL and optional `--length` / `--style` flags
/// 2. The post is fetched from the esa REST API
/// 3. Gemini writes the summary (long posts are summarized section by section)
/// 4. The formatted summary is posted back to the channel
///
/// # Architecture
///
/// The system uses:
/// - slack-morphism Socket Mode for receiving `app_mention` events and posting replies
/// - reqwest for the esa and Gemini REST APIs
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use esa_summarizer::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     esa_summarizer::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     esa_summarizer::api::run_socket_mode(&config).await?;
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod diagnostics;
pub mod errors;
pub mod esa;
pub mod slack;
pub mod worker;

pub use ai::estimate_tokens;
pub use errors::{BotError, FetchError};

/// Configure structured logging with JSON output.
///
/// Verbosity comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; only the first call installs a subscriber.
///
/// # Example
///
/// ```
/// esa_summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
