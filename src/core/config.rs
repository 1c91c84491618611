use std::env;

use crate::errors::BotError;

pub const DEFAULT_ESA_API_BASE: &str = "https://api.esa.io/v1";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite-preview-09-2025";

/// Process-wide settings for the bot, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_bot_token: String,
    pub slack_app_token: String,
    pub esa_access_token: String,
    pub esa_team_name: String,
    pub esa_api_base: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
}

impl AppConfig {
    /// Load a `.env` file if one exists, then read the process environment.
    ///
    /// # Errors
    ///
    /// Returns `BotError::ConfigError` naming the first required variable that
    /// is missing or blank.
    pub fn from_env() -> Result<Self, BotError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `BotError::ConfigError` when a required key is absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| BotError::ConfigError(format!("{key} is not set")))
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            slack_bot_token: required("SLACK_BOT_TOKEN")?,
            slack_app_token: required("SLACK_APP_TOKEN")?,
            esa_access_token: required("ESA_ACCESS_TOKEN")?,
            esa_team_name: required("ESA_TEAM_NAME")?,
            esa_api_base: optional("ESA_API_BASE", DEFAULT_ESA_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: optional("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_api_base: optional("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE)
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

/// Settings for the connectivity diagnostics. Nothing here is required; the
/// diagnostics report what is missing instead of refusing to start.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsConfig {
    pub slack_bot_token: Option<String>,
    pub slack_app_token: Option<String>,
    pub watch_channel_id: Option<String>,
    pub summary_channel_ids: Vec<String>,
}

impl DiagnosticsConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let summary_channel_ids = non_blank("ESA_SUMMARY_CHANNEL_IDS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            slack_bot_token: non_blank("SLACK_BOT_TOKEN"),
            slack_app_token: non_blank("SLACK_APP_TOKEN"),
            watch_channel_id: non_blank("ESA_WATCH_CHANNEL_ID"),
            summary_channel_ids,
        }
    }

    /// Watch channel followed by summary channels, deduplicated, in order.
    #[must_use]
    pub fn target_channel_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self
            .watch_channel_id
            .iter()
            .chain(self.summary_channel_ids.iter())
        {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }
}
