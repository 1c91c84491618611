use esa_summarizer::core::config::DiagnosticsConfig;
use esa_summarizer::diagnostics::{DEFAULT_SLACK_API_BASE, Severity, run_diagnostics};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    esa_summarizer::setup_logging();

    let config = DiagnosticsConfig::from_env();
    let report = run_diagnostics(&config, DEFAULT_SLACK_API_BASE).await;

    if !report.completed || report.count(Severity::Error) > 0 {
        anyhow::bail!(
            "diagnostics found {} error(s)",
            report.count(Severity::Error)
        );
    }
    Ok(())
}
