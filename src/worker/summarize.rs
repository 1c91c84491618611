use std::sync::Arc;

use tracing::info;

use crate::ai::{LONG_DOCUMENT_THRESHOLD, Summarizer};
use crate::core::models::{Document, SummaryLength, SummaryResult, SummaryStyle};
use crate::errors::BotError;

/// Summarize a fetched document, picking the strategy by body length.
///
/// Bodies over [`LONG_DOCUMENT_THRESHOLD`] characters go through the
/// section-by-section path, which ignores the requested options. The work
/// runs on its own task; a panic inside it surfaces here as
/// `BotError::SummarizationError`.
///
/// # Errors
///
/// Returns `BotError::SummarizationError` if the summarization task panics or
/// is cancelled. Model failures are not errors; they come back as text.
pub async fn summarize_document(
    summarizer: Arc<Summarizer>,
    doc: Document,
    length: SummaryLength,
    style: SummaryStyle,
) -> Result<SummaryResult, BotError> {
    let body_chars = doc.body_chars();
    let job = tokio::spawn(async move {
        if body_chars > LONG_DOCUMENT_THRESHOLD {
            summarizer
                .summarize_long_document(&doc.title, &doc.body, &doc.category)
                .await
        } else {
            let text = summarizer
                .summarize(&doc.title, &doc.body, &doc.category, length, style)
                .await;
            SummaryResult {
                text,
                sectioned: false,
            }
        }
    });

    let result = job.await?;
    info!(
        body_chars,
        sectioned = result.sectioned,
        summary_chars = result.text.chars().count(),
        "Summary ready"
    );
    Ok(result)
}
