//! HTTP calls to the chat backend.
//!
//! Two endpoints are used:
//! - `GET  <backend>/api/chat/config` for starter questions
//! - `POST <backend>/api/chat` for replies, streamed as plain text

use std::fmt;

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, error, info, warn};
use tokio::sync::mpsc::Sender;

use super::types::{ChatRequest, ClientConfig};
use crate::core::message::Message;

/// Errors from the backend HTTP calls.
#[derive(Debug)]
pub enum ApiError {
    /// Connection, DNS or body-read failure.
    Network(String),
    /// Backend answered with a non-success status.
    Status { status: u16, body: String },
    /// Body was not the JSON we expected.
    Decode(String),
    /// The receiving side of a stream went away.
    ChannelClosed,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Status { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
            ApiError::ChannelClosed => write!(f, "channel closed"),
        }
    }
}

impl std::error::Error for ApiError {}

pub fn config_url(backend: &str) -> String {
    format!("{}/api/chat/config", backend.trim_end_matches('/'))
}

pub fn chat_url(backend: &str) -> String {
    format!("{}/api/chat", backend.trim_end_matches('/'))
}

/// Fetches the backend's client config.
///
/// The body is decoded whatever the status code: a JSON body is used as is.
/// Only a failed request or an undecodable body is an error; for the latter
/// a non-success status is reported as [`ApiError::Status`].
pub async fn fetch_client_config(
    client: &reqwest::Client,
    backend: &str,
) -> Result<ClientConfig, ApiError> {
    let url = config_url(backend);
    debug!("GET {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    match serde_json::from_str::<ClientConfig>(&body) {
        Ok(config) => {
            if !status.is_success() {
                debug!("Config answered {} with a JSON body, using it", status);
            }
            Ok(config)
        }
        Err(_) if !status.is_success() => Err(ApiError::Status {
            status: status.as_u16(),
            body,
        }),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

/// Fetches starter questions, logging and swallowing any failure.
///
/// Returns `None` on error or when the backend has no (or an empty) list.
pub async fn load_starter_questions(client: &reqwest::Client, backend: &str) -> Option<Vec<String>> {
    match fetch_client_config(client, backend).await {
        Ok(config) => config.non_empty_starters(),
        Err(e) => {
            error!("Error fetching config: {}", e);
            None
        }
    }
}

/// Produces the assistant's reply to a conversation, one text chunk at a time.
#[async_trait]
pub trait ChatResponder: Send + Sync {
    fn name(&self) -> &str;

    /// Streams the reply for `messages` into `sender`. Returns when the reply
    /// is complete.
    async fn stream_reply(
        &self,
        messages: Vec<Message>,
        sender: Sender<String>,
    ) -> Result<(), ApiError>;
}

/// Posts the transcript to `<backend>/api/chat` and forwards the response
/// body as it arrives.
pub struct HttpResponder {
    backend: String,
    client: reqwest::Client,
}

impl HttpResponder {
    pub fn new(backend: String, client: reqwest::Client) -> Self {
        Self { backend, client }
    }
}

#[async_trait]
impl ChatResponder for HttpResponder {
    fn name(&self) -> &str {
        "http"
    }

    async fn stream_reply(
        &self,
        messages: Vec<Message>,
        sender: Sender<String>,
    ) -> Result<(), ApiError> {
        let request = ChatRequest::from_messages(&messages);
        info!("POST {} ({} messages)", chat_url(&self.backend), request.messages.len());

        let response = self
            .client
            .post(chat_url(&self.backend))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat API error: {} - {}", status, body);
            return Err(ApiError::Status { status, body });
        }

        let mut decoder = Utf8Chunks::default();
        let mut total = 0usize;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ApiError::Network(e.to_string()))?;
            let text = decoder.push(&chunk);
            if text.is_empty() {
                continue;
            }
            total += text.len();
            if sender.send(text).await.is_err() {
                warn!("Reply chunk send failed: receiver dropped");
                return Err(ApiError::ChannelClosed);
            }
        }

        let tail = decoder.finish();
        if !tail.is_empty() && sender.send(tail).await.is_err() {
            return Err(ApiError::ChannelClosed);
        }

        info!("Reply complete: {} bytes", total);
        Ok(())
    }
}

/// Decodes UTF-8 across chunk boundaries, holding back an incomplete
/// trailing sequence until the next chunk arrives.
#[derive(Debug, Default)]
pub struct Utf8Chunks {
    pending: Vec<u8>,
}

impl Utf8Chunks {
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let valid_up_to = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            // error_len() == None means the input ended mid-sequence
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(_) => {
                let text = String::from_utf8_lossy(&self.pending).into_owned();
                self.pending.clear();
                return text;
            }
        };
        let rest = self.pending.split_off(valid_up_to);
        let done = std::mem::replace(&mut self.pending, rest);
        String::from_utf8_lossy(&done).into_owned()
    }

    pub fn finish(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slash() {
        assert_eq!(config_url("http://x:1/"), "http://x:1/api/chat/config");
        assert_eq!(chat_url("http://x:1"), "http://x:1/api/chat");
    }

    #[test]
    fn utf8_split_across_chunks() {
        let bytes = "héllo".as_bytes();
        let mut decoder = Utf8Chunks::default();
        // 'é' is two bytes at index 1..3; split in the middle of it
        assert_eq!(decoder.push(&bytes[..2]), "h");
        assert_eq!(decoder.push(&bytes[2..]), "éllo");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        let mut decoder = Utf8Chunks::default();
        let text = decoder.push(&[b'a', 0xff, b'b']);
        assert_eq!(text, "a\u{fffd}b");
    }

    #[test]
    fn truncated_tail_flushed_on_finish() {
        let mut decoder = Utf8Chunks::default();
        assert_eq!(decoder.push(&[0xc3]), "");
        assert_eq!(decoder.finish(), "\u{fffd}");
    }

    #[test]
    fn api_error_display() {
        let err = ApiError::Status {
            status: 503,
            body: "down".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: down");
    }
}
