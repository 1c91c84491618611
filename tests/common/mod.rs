#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use esa_summarizer::ai::TextGenerator;
use esa_summarizer::core::models::Document;
use esa_summarizer::errors::{BotError, FetchError};
use esa_summarizer::esa::DocumentSource;
use esa_summarizer::slack::MessagePoster;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Document source returning one canned result and counting calls.
pub struct FakeDocuments {
    result: Result<Document, FetchError>,
    pub requested: Mutex<Vec<u64>>,
}

impl FakeDocuments {
    pub fn returning(doc: Document) -> Self {
        Self {
            result: Ok(doc),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: FetchError) -> Self {
        Self {
            result: Err(err),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentSource for FakeDocuments {
    async fn fetch_by_number(&self, number: u64) -> Result<Document, FetchError> {
        self.requested.lock().unwrap().push(number);
        self.result.clone()
    }
}

/// Generator that records prompts and answers from a queue, or echoes the prompt.
#[derive(Default)]
pub struct FakeGenerator {
    responses: Mutex<VecDeque<Result<String, String>>>,
    pub prompts: Mutex<Vec<String>>,
    panic_on_call: bool,
}

impl FakeGenerator {
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn failing(detail: &str) -> Self {
        let generator = Self::default();
        generator.queue_error(detail);
        generator
    }

    pub fn panicking() -> Self {
        Self {
            panic_on_call: true,
            ..Self::default()
        }
    }

    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn queue_error(&self, detail: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(detail.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        assert!(!self.panic_on_call, "generator exploded");
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(detail)) => Err(BotError::GeminiError(detail)),
            None => Ok(format!("ECHO: {prompt}")),
        }
    }
}

/// Poster that records every message.
#[derive(Default)]
pub struct RecordingPoster {
    pub posts: Mutex<Vec<(String, String)>>,
    fail_after: Option<usize>,
}

impl RecordingPoster {
    /// Accept the first `n` posts, then fail every later one.
    pub fn failing_after(n: usize) -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            fail_after: Some(n),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn channels(&self) -> Vec<String> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .map(|(c, _)| c.clone())
            .collect()
    }
}

#[async_trait]
impl MessagePoster for RecordingPoster {
    async fn post_message(&self, channel_id: &str, message: &str) -> Result<(), BotError> {
        let mut posts = self.posts.lock().unwrap();
        if let Some(limit) = self.fail_after
            && posts.len() >= limit
        {
            return Err(BotError::ApiError("channel_not_found".to_string()));
        }
        posts.push((channel_id.to_string(), message.to_string()));
        Ok(())
    }
}

pub fn document(number: u64, title: &str, body: &str) -> Document {
    Document {
        number,
        title: title.to_string(),
        body: body.to_string(),
        category: String::new(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
        team: "team".to_string(),
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}

/// A canned response served by [`spawn_http_server`].
#[derive(Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Serve `response` to every connection on a local port.
///
/// Returns the base URL and a log of request heads (request line plus headers).
pub async fn spawn_http_server(response: CannedResponse) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let response = response.clone();
            let log = Arc::clone(&log);
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(head_end) = find_head_end(&buf) {
                        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
                        let body_len = content_length(&head);
                        while buf.len() < head_end + 4 + body_len {
                            let n = socket.read(&mut chunk).await.unwrap_or(0);
                            if n == 0 {
                                break;
                            }
                            buf.extend_from_slice(&chunk[..n]);
                        }
                        let body_start = head_end + 4;
                        let body_end = buf.len().min(body_start + body_len);
                        let body = String::from_utf8_lossy(&buf[body_start..body_end]);
                        log.lock().unwrap().push(format!("{head}\r\n\r\n{body}"));
                        break;
                    }
                }

                let reply = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response.status,
                    response.body.len(),
                    response.body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{addr}"), requests)
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

/// A base URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
