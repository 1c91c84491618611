use esa_summarizer::core::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    esa_summarizer::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        e
    })?;

    esa_summarizer::api::run_socket_mode(&config).await?;
    Ok(())
}
