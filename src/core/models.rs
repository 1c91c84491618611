use serde::{Deserialize, Serialize};
use std::fmt;

/// An esa post as fetched for one request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub number: u64,
    pub title: String,
    pub body: String,
    /// Empty when the post has no category.
    pub category: String,
    /// Raw `updated_at` from esa, empty when absent.
    pub updated_at: String,
    pub team: String,
}

impl Document {
    /// Body length in characters, the unit used for the long-document threshold.
    #[must_use]
    pub fn body_chars(&self) -> usize {
        self.body.chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    /// Exact, case-sensitive match against `short`, `medium` or `long`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }

    /// Like [`SummaryLength::parse`] but unknown values fall back to `medium`.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    #[default]
    Bullet,
    Paragraph,
}

impl SummaryStyle {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bullet" => Some(Self::Bullet),
            "paragraph" => Some(Self::Paragraph),
            _ => None,
        }
    }

    /// Unknown values fall back to `bullet`.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bullet => "bullet",
            Self::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one mention asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub url: String,
    pub length: SummaryLength,
    pub style: SummaryStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub text: String,
    /// Produced by the section-by-section strategy for long documents.
    pub sectioned: bool,
}

/// An `app_mention` event reduced to what the dispatcher needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub text: String,
    pub user_id: String,
    pub channel_id: String,
}
