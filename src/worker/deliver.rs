use tracing::{error, info};

use crate::errors::BotError;
use crate::slack::MessagePoster;

/// Post a reply that nothing downstream depends on; failures are only logged.
pub async fn reply(poster: &dyn MessagePoster, channel_id: &str, message: &str) {
    if let Err(e) = poster.post_message(channel_id, message).await {
        error!(channel = %channel_id, "Failed to post reply: {}", e);
    }
}

/// Post the final summary message.
///
/// # Errors
///
/// Returns the Slack error so the caller can report it to the user.
pub async fn deliver_summary(
    poster: &dyn MessagePoster,
    channel_id: &str,
    message: &str,
) -> Result<(), BotError> {
    poster.post_message(channel_id, message).await?;
    info!(channel = %channel_id, "Summary delivered");
    Ok(())
}
