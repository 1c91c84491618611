//! esa REST API client
//!
//! Fetches a single post by number with a bearer token. Every failure is
//! returned as a [`FetchError`]; nothing is retried.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::core::config::AppConfig;
use crate::core::models::Document;
use crate::errors::FetchError;

const UNTITLED: &str = "タイトルなし";

/// Extract the post number from an esa URL such as `https://team.esa.io/posts/123`.
///
/// Pure string matching: the first `/posts/<digits>` segment wins and the host
/// is not checked.
///
/// ```
/// use esa_summarizer::esa::resolve_post_number;
///
/// assert_eq!(resolve_post_number("https://team.esa.io/posts/123"), Some(123));
/// assert_eq!(resolve_post_number("https://team.esa.io/"), None);
/// ```
#[must_use]
pub fn resolve_post_number(url: &str) -> Option<u64> {
    static POST_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"/posts/(\d+)").expect("static regex compile"));

    POST_RE
        .captures(url)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Anything that can produce an esa [`Document`].
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_by_number(&self, number: u64) -> Result<Document, FetchError>;

    /// Resolve `url` to a post number, then fetch it.
    async fn fetch_by_url(&self, url: &str) -> Result<Document, FetchError> {
        let number =
            resolve_post_number(url).ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;
        self.fetch_by_number(number).await
    }
}

#[derive(Debug, Default, Deserialize)]
struct EsaPost {
    name: Option<String>,
    body_md: Option<String>,
    category: Option<String>,
    updated_at: Option<String>,
    number: Option<u64>,
}

/// Turn a decoded esa response into a [`Document`].
///
/// The post may be wrapped in a `post` object or sit at the top level.
/// Missing fields get the same defaults the chat reply expects.
///
/// # Errors
///
/// Returns `FetchError::Malformed` if the payload is not a post object.
pub fn parse_post_response(
    payload: Value,
    requested_number: u64,
    team: &str,
) -> Result<Document, FetchError> {
    let post_value = match payload {
        Value::Object(mut map) if map.contains_key("post") => {
            map.remove("post").unwrap_or(Value::Null)
        }
        other => other,
    };

    let post: EsaPost = serde_json::from_value(post_value)
        .map_err(|e| FetchError::Malformed(format!("unexpected post shape: {e}")))?;

    Ok(Document {
        number: post.number.unwrap_or(requested_number),
        title: post.name.unwrap_or_else(|| UNTITLED.to_string()),
        body: post.body_md.unwrap_or_default(),
        category: post.category.unwrap_or_default(),
        updated_at: post.updated_at.unwrap_or_default(),
        team: team.to_string(),
    })
}

/// esa API client bound to one team
pub struct EsaClient {
    http: Client,
    api_base: String,
    team_name: String,
    access_token: String,
}

impl EsaClient {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            api_base: config.esa_api_base.clone(),
            team_name: config.esa_team_name.clone(),
            access_token: config.esa_access_token.clone(),
        }
    }

    /// `{base}/teams/{team}/posts/{number}`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if the configured base is not a URL.
    pub fn post_endpoint(&self, number: u64) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", self.api_base)))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl(self.api_base.clone()))?
            .pop_if_empty()
            .extend([
                "teams",
                self.team_name.as_str(),
                "posts",
                number.to_string().as_str(),
            ]);
        Ok(url)
    }

    async fn request_post(&self, number: u64) -> Result<Document, FetchError> {
        let endpoint = self.post_endpoint(number)?;
        debug!(endpoint = %endpoint, "Requesting esa post");

        let response = self
            .http
            .get(endpoint)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(number));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                number,
                status: status.as_u16(),
            });
        }

        let payload: Value = response.json().await.map_err(|e| {
            FetchError::Malformed(format!("esa response for post #{number} is not JSON: {e}"))
        })?;

        parse_post_response(payload, number, &self.team_name)
    }
}

#[async_trait]
impl DocumentSource for EsaClient {
    async fn fetch_by_number(&self, number: u64) -> Result<Document, FetchError> {
        match self.request_post(number).await {
            Ok(doc) => {
                info!(
                    post_number = doc.number,
                    body_chars = doc.body_chars(),
                    "Fetched esa post"
                );
                Ok(doc)
            }
            Err(e) => {
                warn!(post_number = number, "esa API error: {}", e);
                Err(e)
            }
        }
    }
}
