use std::sync::Arc;

use slack_morphism::prelude::*;
use tracing::{info, warn};

use super::event_handler::{handle_listener_error, handle_push_event};
use crate::core::config::AppConfig;
use crate::errors::BotError;
use crate::slack::{SlackClient, new_hyper_client};
use crate::worker::Dispatcher;

/// Connect to Slack over Socket Mode and serve mentions until the process exits.
///
/// # Errors
///
/// Returns an error if the HTTP connector cannot be built or the app token is
/// rejected when opening the socket.
pub async fn run_socket_mode(config: &AppConfig) -> Result<(), BotError> {
    let client = new_hyper_client()?;
    let dispatcher = Arc::new(Dispatcher::from_config(config, Arc::clone(&client)));

    let callbacks = SlackSocketModeListenerCallbacks::new().with_push_events(handle_push_event);

    let listener_environment = Arc::new(
        SlackClientEventsListenerEnvironment::new(Arc::clone(&client))
            .with_error_handler(handle_listener_error)
            .with_user_state(dispatcher),
    );

    let socket_mode_listener = SlackClientSocketModeListener::new(
        &SlackClientSocketModeConfig::new(),
        listener_environment,
        callbacks,
    );

    let app_token = SlackApiToken::new(SlackApiTokenValue::new(config.slack_app_token.clone()));
    socket_mode_listener.listen_for(&app_token).await?;

    match SlackClient::new(Arc::clone(&client), config.slack_bot_token.clone())
        .get_bot_user_id()
        .await
    {
        Ok(bot_user_id) => info!(bot_user_id = %bot_user_id, "Bot identity resolved"),
        Err(e) => warn!("Could not resolve bot user id: {}", e),
    }

    info!(
        model = %config.gemini_model,
        team = %config.esa_team_name,
        "esa summarizer is running; mention the bot with an esa URL, e.g. \
         @esa-summarizer https://your-team.esa.io/posts/123"
    );

    socket_mode_listener.serve().await;
    Ok(())
}
