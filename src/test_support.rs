//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::api::{ApiError, ChatResponder};
use crate::core::message::Message;

/// A responder that replays a fixed script instead of calling a backend.
pub struct ScriptedResponder {
    chunks: Vec<String>,
    fail_status: Option<u16>,
    received: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedResponder {
    /// Streams `chunks` in order, then completes.
    pub fn replying(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            fail_status: None,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Fails every request with an HTTP `status` error.
    pub fn failing(status: u16) -> Self {
        Self {
            chunks: Vec::new(),
            fail_status: Some(status),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Transcripts passed to `stream_reply`, one entry per call.
    pub fn received(&self) -> Vec<Vec<Message>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatResponder for ScriptedResponder {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn stream_reply(
        &self,
        messages: Vec<Message>,
        sender: Sender<String>,
    ) -> Result<(), ApiError> {
        self.received.lock().unwrap().push(messages);
        if let Some(status) = self.fail_status {
            return Err(ApiError::Status {
                status,
                body: "scripted failure".to_string(),
            });
        }
        for chunk in &self.chunks {
            sender
                .send(chunk.clone())
                .await
                .map_err(|_| ApiError::ChannelClosed)?;
        }
        Ok(())
    }
}
