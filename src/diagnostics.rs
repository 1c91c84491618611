//! Read-only Slack connectivity checks
//!
//! Verifies the tokens, `auth.test`, membership of the configured channels and
//! (best effort) the granted permissions. Slack does not expose event
//! subscriptions over the Web API, so those are only mentioned in the closing
//! hint.

use std::collections::HashMap;

use reqwest::Client;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::core::config::DiagnosticsConfig;
use crate::errors::BotError;

pub const DEFAULT_SLACK_API_BASE: &str = "https://slack.com/api";
const CONVERSATIONS_PAGE_LIMIT: u32 = 200;
const CLOSING_HINT: &str = "診断完了。イベント未着の場合は: 1) Event Subscriptions(app_mention) \
    2) Bot招待 3) スコープ再インストール を確認してください。";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Default, Clone)]
pub struct DiagnosticsReport {
    pub findings: Vec<Finding>,
    /// False when a fatal check stopped the run early.
    pub completed: bool,
}

impl DiagnosticsReport {
    fn record(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Info => info!("{}", message),
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
        self.findings.push(Finding { severity, message });
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Token presence and prefix checks. Returns `false` when the bot token is
/// missing and nothing else can be checked.
pub fn check_tokens(config: &DiagnosticsConfig, report: &mut DiagnosticsReport) -> bool {
    let Some(bot_token) = config.slack_bot_token.as_deref() else {
        report.record(
            Severity::Error,
            "SLACK_BOT_TOKEN が空です。 .env を確認してください。",
        );
        return false;
    };

    match config.slack_app_token.as_deref() {
        None => report.record(
            Severity::Warning,
            "SLACK_APP_TOKEN が空です。Socket Mode が無効の可能性。",
        ),
        Some(app_token) if !app_token.starts_with("xapp-") => report.record(
            Severity::Warning,
            "SLACK_APP_TOKEN の形式が xapp- ではありません。App-Level Token を再確認。",
        ),
        Some(_) => {}
    }

    if !bot_token.starts_with("xoxb-") {
        report.record(
            Severity::Warning,
            "SLACK_BOT_TOKEN の形式が xoxb- ではありません。Bot Token を再確認。",
        );
    }

    true
}

/// Summarise what was learned about each target channel.
pub fn check_channels(
    targets: &[String],
    found: &HashMap<String, Value>,
    report: &mut DiagnosticsReport,
) {
    for id in targets {
        let Some(channel) = found.get(id) else {
            report.record(
                Severity::Warning,
                format!("チャンネル未検出: {id} (Bot未参加かID不一致)"),
            );
            continue;
        };

        let name = channel.get("name").and_then(Value::as_str).unwrap_or("");
        let is_member = channel
            .get("is_member")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let is_private = channel
            .get("is_private")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        report.record(
            Severity::Info,
            format!(
                "チャンネル検出: {id} name={name} is_member={is_member} is_private={is_private}"
            ),
        );
        if !is_member {
            report.record(
                Severity::Warning,
                format!("Botはチャンネル {id} に参加していません。/invite で追加してください。"),
            );
        }
    }
}

/// Slack Web API calls used by the diagnostics
pub struct SlackDiagnostics {
    http: Client,
    api_base: String,
    token: String,
}

impl SlackDiagnostics {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self::with_api_base(token, DEFAULT_SLACK_API_BASE)
    }

    #[must_use]
    pub fn with_api_base(token: String, api_base: &str) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn call(&self, method: &str, query: &[(&str, String)]) -> Result<Value, BotError> {
        let resp = self
            .http
            .get(format!("{}/{method}", self.api_base))
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| BotError::HttpError(format!("{method} request failed: {e}")))?;

        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| BotError::ApiError(format!("{method} HTTP {status}: {e}")))?;

        if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            return Err(BotError::ApiError(format!(
                "{method} HTTP {status}: {}",
                body.get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
            )));
        }

        Ok(body)
    }

    /// # Errors
    ///
    /// Returns an error if `auth.test` fails or Slack rejects the token.
    pub async fn auth_test(&self) -> Result<Value, BotError> {
        self.call("auth.test", &[]).await
    }

    /// Page through `conversations.list` and keep the channels whose ID is in `targets`.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub async fn find_channels(
        &self,
        targets: &[String],
    ) -> Result<HashMap<String, Value>, BotError> {
        let mut found = HashMap::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query = vec![
                ("types", "public_channel,private_channel".to_string()),
                ("limit", CONVERSATIONS_PAGE_LIMIT.to_string()),
            ];
            if let Some(c) = cursor.take() {
                query.push(("cursor", c));
            }

            let page = self.call("conversations.list", &query).await?;
            for channel in page
                .get("channels")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
            {
                if let Some(id) = channel.get("id").and_then(Value::as_str)
                    && targets.iter().any(|t| t == id)
                {
                    found.insert(id.to_string(), channel.clone());
                }
            }

            cursor = page
                .get("response_metadata")
                .and_then(|m| m.get("next_cursor"))
                .and_then(Value::as_str)
                .filter(|c| !c.is_empty())
                .map(ToString::to_string);
            if cursor.is_none() {
                break;
            }
        }

        Ok(found)
    }

    /// # Errors
    ///
    /// Returns an error if `apps.permissions.info` is unavailable for this token.
    pub async fn permissions_info(&self) -> Result<Value, BotError> {
        self.call("apps.permissions.info", &[]).await
    }
}

/// Run every check in order and return what was found.
pub async fn run_diagnostics(config: &DiagnosticsConfig, api_base: &str) -> DiagnosticsReport {
    let mut report = DiagnosticsReport::default();

    if !check_tokens(config, &mut report) {
        return report;
    }
    let token = config.slack_bot_token.clone().unwrap_or_default();
    let slack = SlackDiagnostics::with_api_base(token, api_base);

    match slack.auth_test().await {
        Ok(auth) => {
            let field = |key: &str| {
                auth.get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            report.record(
                Severity::Info,
                format!(
                    "auth.test OK user_id={} team={} url={}",
                    field("user_id"),
                    field("team"),
                    field("url")
                ),
            );
        }
        Err(e) => {
            report.record(Severity::Error, format!("auth.test 失敗: {e}"));
            return report;
        }
    }

    let targets = config.target_channel_ids();
    let found = match slack.find_channels(&targets).await {
        Ok(found) => found,
        Err(e) => {
            report.record(Severity::Error, format!("conversations.list 失敗: {e}"));
            HashMap::new()
        }
    };
    check_channels(&targets, &found, &mut report);

    match slack.permissions_info().await {
        Ok(perm) => {
            let keys: Vec<&str> = perm
                .as_object()
                .map(|m| m.keys().map(String::as_str).collect())
                .unwrap_or_default();
            report.record(
                Severity::Info,
                format!("permissions.info 応答: keys={keys:?}"),
            );
        }
        Err(e) => report.record(
            Severity::Warning,
            format!("apps.permissions.info 取得失敗 (権限不足か非対応): {e}"),
        ),
    }

    report.record(Severity::Info, CLOSING_HINT);
    report.completed = true;
    report
}
