//! Handler for Socket Mode push events.
//!
//! Only `app_mention` is acted on. The dispatcher runs on a spawned task so
//! the listener acknowledges the envelope right away.

use std::sync::Arc;

use slack_morphism::prelude::*;
use tracing::{debug, error};

use crate::core::models::ChatEvent;
use crate::worker::Dispatcher;

#[must_use]
pub fn mention_to_chat_event(mention: &SlackAppMentionEvent) -> ChatEvent {
    ChatEvent {
        text: mention.content.text.clone().unwrap_or_default(),
        user_id: mention.user.0.clone(),
        channel_id: mention.channel.0.clone(),
    }
}

/// Pick the mention out of a push event body, ignoring everything else.
#[must_use]
pub fn chat_event_from_body(body: &SlackEventCallbackBody) -> Option<ChatEvent> {
    match body {
        SlackEventCallbackBody::AppMention(mention) => Some(mention_to_chat_event(mention)),
        _ => None,
    }
}

pub async fn handle_push_event(
    event: SlackPushEventCallback,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> UserCallbackResult<()> {
    let Some(chat_event) = chat_event_from_body(&event.event) else {
        debug!("Ignoring non-mention push event");
        return Ok(());
    };

    let dispatcher = {
        let storage = states.read().await;
        storage.get_user_state::<Arc<Dispatcher>>().cloned()
    };

    let Some(dispatcher) = dispatcher else {
        error!("Dispatcher missing from listener state; dropping mention");
        return Ok(());
    };

    tokio::spawn(async move {
        dispatcher.handle_mention(&chat_event).await;
    });

    Ok(())
}

pub fn handle_listener_error(
    err: Box<dyn std::error::Error + Send + Sync>,
    _client: Arc<SlackHyperClient>,
    _states: SlackClientEventsUserState,
) -> HttpStatusCode {
    error!("Socket Mode listener error: {:#?}", err);
    // Envelopes are always acknowledged; Slack must not redeliver.
    HttpStatusCode::OK
}
