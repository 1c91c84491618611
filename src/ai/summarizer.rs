use std::sync::Arc;

use tracing::{info, warn};

use super::client::TextGenerator;
use super::prompt_builder::build_summary_prompt;
use crate::core::models::{SummaryLength, SummaryResult, SummaryStyle};

/// Bodies longer than this many characters are summarized section by section.
pub const LONG_DOCUMENT_THRESHOLD: usize = 10_000;

/// At most this many sections are summarized; the rest of the document is dropped.
pub const MAX_SECTIONS: usize = 5;

/// Split marker for sections: a second-level markdown heading at line start.
pub const SECTION_DELIMITER: &str = "\n## ";

pub const INTRODUCTION_TITLE: &str = "導入部";
pub const SECTIONED_BANNER: &str = "📑 **セクション別要約**";
pub const SECTIONED_FOOTER: &str = "*(長文のため分割要約しました)*";
pub const GENERATION_ERROR_PREFIX: &str = "要約生成エラー: ";

/// Turns documents into summary text with a [`TextGenerator`].
pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
}

impl Summarizer {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Summarize one piece of text in a single model call.
    ///
    /// Generator failures are not returned as errors: the error detail becomes
    /// the summary text, prefixed with [`GENERATION_ERROR_PREFIX`].
    pub async fn summarize(
        &self,
        title: &str,
        body: &str,
        category: &str,
        length: SummaryLength,
        style: SummaryStyle,
    ) -> String {
        let prompt = build_summary_prompt(title, body, category, length, style);
        match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(title = %title, "Summary generation failed: {}", e);
                format!("{GENERATION_ERROR_PREFIX}{e}")
            }
        }
    }

    /// Summarize a document that may exceed [`LONG_DOCUMENT_THRESHOLD`].
    ///
    /// Short bodies go straight to [`Summarizer::summarize`] with default options.
    /// Longer bodies are split on [`SECTION_DELIMITER`]; the first
    /// [`MAX_SECTIONS`] sections are each truncated to the threshold and
    /// summarized with `short` length, then joined under a banner.
    pub async fn summarize_long_document(
        &self,
        title: &str,
        body: &str,
        category: &str,
    ) -> SummaryResult {
        if body.chars().count() <= LONG_DOCUMENT_THRESHOLD {
            let text = self
                .summarize(
                    title,
                    body,
                    category,
                    SummaryLength::default(),
                    SummaryStyle::default(),
                )
                .await;
            return SummaryResult {
                text,
                sectioned: false,
            };
        }

        let sections = split_sections(body);
        info!(
            title = %title,
            sections = sections.len(),
            "Summarizing long document by section"
        );

        let mut summaries = Vec::with_capacity(sections.len());
        for section in &sections {
            let summary = self
                .summarize(
                    &format!("{title} - {}", section.heading),
                    &section.content,
                    category,
                    SummaryLength::Short,
                    SummaryStyle::default(),
                )
                .await;
            summaries.push(format!("**{}**\n{summary}", section.heading));
        }

        SummaryResult {
            text: format!(
                "{SECTIONED_BANNER}\n\n{}\n\n{SECTIONED_FOOTER}",
                summaries.join("\n\n")
            ),
            sectioned: true,
        }
    }
}

/// One chunk of a long document as it will be summarized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    /// Section text truncated to [`LONG_DOCUMENT_THRESHOLD`] characters.
    pub content: String,
}

/// Split `body` into at most [`MAX_SECTIONS`] sections.
///
/// The first section is titled [`INTRODUCTION_TITLE`]; later ones take the
/// first line after the heading marker as their title.
#[must_use]
pub fn split_sections(body: &str) -> Vec<Section> {
    body.split(SECTION_DELIMITER)
        .take(MAX_SECTIONS)
        .enumerate()
        .map(|(i, raw)| {
            let heading = if i == 0 {
                INTRODUCTION_TITLE.to_string()
            } else {
                raw.split('\n').next().unwrap_or_default().to_string()
            };
            Section {
                heading,
                content: raw.chars().take(LONG_DOCUMENT_THRESHOLD).collect(),
            }
        })
        .collect()
}
