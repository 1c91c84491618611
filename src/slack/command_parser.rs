//! Mention text parsing
//!
//! A mention is read as a token stream: mention tokens, optional
//! `--length <value>` / `--style <value>` flag pairs in any order, and the
//! first HTTP(S) URL. Anything else is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::models::{SummaryLength, SummaryRequest, SummaryStyle};

pub const LENGTH_FLAG: &str = "--length";
pub const STYLE_FLAG: &str = "--style";
pub const HELP_KEYWORD: &str = "help";
pub const HELP_KEYWORD_JA: &str = "ヘルプ";

/// What a mention asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Flags parsed but no URL present.
    MissingUrl {
        length: SummaryLength,
        style: SummaryStyle,
    },
    Summarize(SummaryRequest),
}

/// Flags pulled out of a mention, plus the text left over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFlags {
    pub length: SummaryLength,
    pub style: SummaryStyle,
    pub residual: String,
}

/// Remove every `<@U…>` user mention and trim the result.
#[must_use]
pub fn strip_mentions(text: &str) -> String {
    static MENTION_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"<@[A-Z0-9]+>").expect("static regex compile"));

    MENTION_RE.replace_all(text, "").trim().to_string()
}

/// Empty text, `help` in any case, or `ヘルプ` anywhere in the text.
#[must_use]
pub fn is_help_request(stripped: &str) -> bool {
    stripped.is_empty()
        || stripped.to_lowercase().contains(HELP_KEYWORD)
        || stripped.contains(HELP_KEYWORD_JA)
}

/// Consume `--length <v>` and `--style <v>` pairs with recognised values.
///
/// A flag followed by an unknown value (or nothing) is left untouched in the
/// residual text and the default applies. When a flag appears more than
/// once the last recognised value wins.
#[must_use]
pub fn extract_flags(text: &str) -> ParsedFlags {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut length = SummaryLength::default();
    let mut style = SummaryStyle::default();
    let mut residual: Vec<&str> = Vec::with_capacity(tokens.len());

    let mut i = 0;
    while i < tokens.len() {
        let value = tokens.get(i + 1).copied();
        match tokens[i] {
            LENGTH_FLAG => {
                if let Some(parsed) = value.and_then(SummaryLength::parse) {
                    length = parsed;
                    i += 2;
                    continue;
                }
            }
            STYLE_FLAG => {
                if let Some(parsed) = value.and_then(SummaryStyle::parse) {
                    style = parsed;
                    i += 2;
                    continue;
                }
            }
            _ => {}
        }
        residual.push(tokens[i]);
        i += 1;
    }

    ParsedFlags {
        length,
        style,
        residual: residual.join(" "),
    }
}

/// First HTTP(S) URL in `text`.
///
/// Slack wraps links as `<https://…>` or `<https://…|label>`; the brackets and
/// label are not part of the returned URL.
#[must_use]
pub fn extract_url(text: &str) -> Option<String> {
    static URL_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"https?://[^\s<>|]+").expect("static regex compile"));

    URL_RE.find(text).map(|m| m.as_str().to_string())
}

/// Parse the raw text of an `app_mention` event.
#[must_use]
pub fn parse_command(raw_text: &str) -> Command {
    let stripped = strip_mentions(raw_text);
    if is_help_request(&stripped) {
        return Command::Help;
    }

    let ParsedFlags {
        length,
        style,
        residual,
    } = extract_flags(&stripped);

    match extract_url(&residual) {
        Some(url) => Command::Summarize(SummaryRequest { url, length, style }),
        None => Command::MissingUrl { length, style },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_all_mentions() {
        assert_eq!(strip_mentions("<@U0BOT1> hi <@U234>"), "hi");
        assert_eq!(strip_mentions("  <@U0BOT1>   "), "");
    }

    #[test]
    fn lowercase_mention_ids_are_not_stripped() {
        assert_eq!(strip_mentions("<@abc> x"), "<@abc> x");
    }

    #[test]
    fn consumes_flag_pairs_only() {
        let parsed = extract_flags("https://a/posts/1 --length long --style paragraph");
        assert_eq!(parsed.length, SummaryLength::Long);
        assert_eq!(parsed.style, SummaryStyle::Paragraph);
        assert_eq!(parsed.residual, "https://a/posts/1");
    }

    #[test]
    fn unknown_value_keeps_flag_in_residual() {
        let parsed = extract_flags("--length huge https://a/posts/1");
        assert_eq!(parsed.length, SummaryLength::Medium);
        assert_eq!(parsed.residual, "--length huge https://a/posts/1");
    }

    #[test]
    fn rejected_value_does_not_hide_a_later_pair() {
        let parsed = extract_flags("--length --length short --style x");
        assert_eq!(parsed.length, SummaryLength::Short);
        assert_eq!(parsed.style, SummaryStyle::Bullet);
        assert_eq!(parsed.residual, "--length --style x");
    }

    #[test]
    fn trailing_flag_without_value_is_ignored() {
        let parsed = extract_flags("https://a/posts/1 --style");
        assert_eq!(parsed.style, SummaryStyle::Bullet);
        assert_eq!(parsed.residual, "https://a/posts/1 --style");
    }

    #[test]
    fn flag_text_inside_url_is_not_a_flag() {
        let parsed = extract_flags("https://a/posts/1?q=--length+long");
        assert_eq!(parsed.length, SummaryLength::Medium);
    }

    #[test]
    fn url_is_unwrapped_from_slack_markup() {
        assert_eq!(
            extract_url("<https://team.esa.io/posts/5|記事>").as_deref(),
            Some("https://team.esa.io/posts/5")
        );
        assert_eq!(
            extract_url("see <https://team.esa.io/posts/6>").as_deref(),
            Some("https://team.esa.io/posts/6")
        );
    }
}
