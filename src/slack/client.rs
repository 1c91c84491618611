//! Slack API client module
//!
//! Posts replies into channels. No retries: a failed post is reported to the
//! caller and logged there.

use std::sync::Arc;

use async_trait::async_trait;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::SlackApiChatPostMessageRequest;
use slack_morphism::{SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent};

use crate::errors::BotError;

/// Somewhere the dispatcher can send a plain-text reply.
#[async_trait]
pub trait MessagePoster: Send + Sync {
    async fn post_message(&self, channel_id: &str, message: &str) -> Result<(), BotError>;
}

/// Build the shared hyper-backed Slack client.
///
/// # Errors
///
/// Returns an error if the HTTPS connector cannot be created.
pub fn new_hyper_client() -> Result<Arc<SlackHyperClient>, BotError> {
    let connector = SlackClientHyperConnector::new().map_err(|e| {
        BotError::ApiError(format!("Failed to create Slack HTTP connector: {e}"))
    })?;
    Ok(Arc::new(SlackHyperClient::new(connector)))
}

/// Slack Web API client authenticated with the bot token
pub struct SlackClient {
    client: Arc<SlackHyperClient>,
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(client: Arc<SlackHyperClient>, token: String) -> Self {
        Self {
            client,
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    /// # Errors
    ///
    /// Returns an error if `auth.test` fails.
    pub async fn get_bot_user_id(&self) -> Result<String, BotError> {
        let session = self.client.open_session(&self.token);
        let test_resp = session.auth_test().await?;
        Ok(test_resp.user_id.0)
    }
}

#[async_trait]
impl MessagePoster for SlackClient {
    async fn post_message(&self, channel_id: &str, message: &str) -> Result<(), BotError> {
        let session = self.client.open_session(&self.token);

        let post_req = SlackApiChatPostMessageRequest::new(
            SlackChannelId(channel_id.to_string()),
            SlackMessageContent::new().with_text(message.to_string()),
        );

        session.chat_post_message(&post_req).await?;

        Ok(())
    }
}
