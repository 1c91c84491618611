use std::sync::Arc;

use slack_morphism::hyper_tokio::SlackHyperClient;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use super::deliver::{deliver_summary, reply};
use super::summarize::summarize_document;
use crate::ai::{GeminiClient, Summarizer, TextGenerator};
use crate::core::config::AppConfig;
use crate::core::models::{ChatEvent, Document, SummaryRequest};
use crate::errors::BotError;
use crate::esa::{DocumentSource, EsaClient};
use crate::slack::command_parser::{Command, parse_command};
use crate::slack::message_formatter::{
    empty_body_message, fetch_failed_message, format_summary_message, help_message,
    missing_url_message, processing_message, summarization_error_message,
};
use crate::slack::{MessagePoster, SlackClient};

/// Where handling of one mention stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Help,
    MissingUrl,
    FetchFailed,
    EmptyBody,
    Summarized { sectioned: bool },
    SummarizationFailed,
}

/// Runs the mention state machine against its three collaborators.
///
/// Holds no per-request state, so one instance serves concurrent mentions.
pub struct Dispatcher {
    documents: Arc<dyn DocumentSource>,
    summarizer: Arc<Summarizer>,
    poster: Arc<dyn MessagePoster>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        documents: Arc<dyn DocumentSource>,
        generator: Arc<dyn TextGenerator>,
        poster: Arc<dyn MessagePoster>,
    ) -> Self {
        Self {
            documents,
            summarizer: Arc::new(Summarizer::new(generator)),
            poster,
        }
    }

    /// Wire the production esa, Gemini and Slack clients.
    #[must_use]
    pub fn from_config(config: &AppConfig, slack: Arc<SlackHyperClient>) -> Self {
        Self::new(
            Arc::new(EsaClient::new(config)),
            Arc::new(GeminiClient::new(config)),
            Arc::new(SlackClient::new(slack, config.slack_bot_token.clone())),
        )
    }

    /// Handle one `app_mention` event from start to finish.
    ///
    /// Every failure ends in a chat reply; nothing is returned as an error.
    pub async fn handle_mention(&self, event: &ChatEvent) -> DispatchOutcome {
        let span = info_span!(
            "mention",
            correlation_id = %Uuid::new_v4(),
            channel = %event.channel_id,
            user = %event.user_id,
        );

        async {
            let outcome = self.dispatch(event).await;
            info!(outcome = ?outcome, "Mention handled");
            outcome
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, event: &ChatEvent) -> DispatchOutcome {
        let channel = event.channel_id.as_str();
        let user = event.user_id.as_str();

        let request = match parse_command(&event.text) {
            Command::Help => {
                reply(self.poster.as_ref(), channel, &help_message(user)).await;
                return DispatchOutcome::Help;
            }
            Command::MissingUrl { length, style } => {
                info!(length = %length, style = %style, "Mention has no URL");
                reply(self.poster.as_ref(), channel, &missing_url_message(user)).await;
                return DispatchOutcome::MissingUrl;
            }
            Command::Summarize(request) => request,
        };

        info!(
            url = %request.url,
            length = %request.length,
            style = %request.style,
            "Summary requested"
        );
        reply(
            self.poster.as_ref(),
            channel,
            &processing_message(user, request.length, request.style),
        )
        .await;

        let doc = match self.documents.fetch_by_url(&request.url).await {
            Ok(doc) => doc,
            Err(e) => {
                warn!(url = %request.url, "Document fetch failed: {}", e);
                reply(self.poster.as_ref(), channel, &fetch_failed_message(user)).await;
                return DispatchOutcome::FetchFailed;
            }
        };

        if doc.body.is_empty() {
            reply(self.poster.as_ref(), channel, &empty_body_message(user)).await;
            return DispatchOutcome::EmptyBody;
        }

        match self.summarize_and_deliver(channel, &request, doc).await {
            Ok(sectioned) => DispatchOutcome::Summarized { sectioned },
            Err(e) => {
                error!("Summarization step failed: {}", e);
                reply(
                    self.poster.as_ref(),
                    channel,
                    &summarization_error_message(user, &e.to_string()),
                )
                .await;
                DispatchOutcome::SummarizationFailed
            }
        }
    }

    async fn summarize_and_deliver(
        &self,
        channel: &str,
        request: &SummaryRequest,
        doc: Document,
    ) -> Result<bool, BotError> {
        let summary = summarize_document(
            Arc::clone(&self.summarizer),
            doc.clone(),
            request.length,
            request.style,
        )
        .await?;

        let message =
            format_summary_message(&doc, &summary.text, &request.url, request.length, request.style);
        deliver_summary(self.poster.as_ref(), channel, &message).await?;
        Ok(summary.sectioned)
    }
}
