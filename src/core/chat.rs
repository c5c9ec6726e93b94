//! # Chat State
//!
//! The collaborator that owns the transcript. The view reads `messages` and
//! `is_loading` from here and sends back `append`, `reload` and `stop` as
//! [`Action`]s.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```
//!
//! `update()` performs no I/O. The returned [`Effect`] tells the adapter what
//! to do next (spawn a request, abort one, ...).

use log::{debug, info, warn};

use crate::core::message::{Message, NewMessage, Role};
use crate::core::starters::StarterQuestions;

/// Identifies one response request. Bumped every time a request starts, so
/// output of an aborted request can be told apart from the current one.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Append(NewMessage),
    Reload,
    Stop,
    ResponseChunk { request: RequestId, text: String },
    ResponseDone(RequestId),
    ResponseFailed { request: RequestId, error: String },
    StartersLoaded(Vec<String>),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    SpawnRequest,
    CancelRequest,
    Quit,
}

#[derive(Debug, Default)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub is_loading: bool,
    pub starters: StarterQuestions,
    pub status_message: String,
    pub error: Option<String>,
    /// Id of the assistant message the active response is streaming into.
    streaming_id: Option<String>,
    request_id: RequestId,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            status_message: String::from("Ready"),
            ..Default::default()
        }
    }

    /// Id of the most recently started request.
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// True when `request` is the live one. Stale output is dropped.
    fn is_current(&self, request: RequestId) -> bool {
        if self.is_loading && request == self.request_id {
            return true;
        }
        debug!(
            "Dropping output of request {} (current {}, loading {})",
            request, self.request_id, self.is_loading
        );
        false
    }

    /// Drops trailing non-user messages so the last user turn can be re-sent.
    /// Returns false when there is no user message to go back to.
    fn rewind_to_last_user(&mut self) -> bool {
        let Some(idx) = self.messages.iter().rposition(|m| m.role.is_user()) else {
            return false;
        };
        self.messages.truncate(idx + 1);
        true
    }

    fn start_response(&mut self) {
        self.is_loading = true;
        self.request_id += 1;
        self.error = None;
        self.streaming_id = None;
        self.status_message = String::from("Thinking...");
    }

    fn finish_response(&mut self) {
        self.is_loading = false;
        self.streaming_id = None;
    }
}

pub fn update(state: &mut ChatState, action: Action) -> Effect {
    match action {
        Action::Append(new_message) => {
            if state.is_loading {
                warn!("Append ignored: a response is already in progress");
                return Effect::None;
            }
            let message = new_message.into_message();
            info!("Appending {:?} message {}", message.role, message.id);
            state.messages.push(message);
            state.start_response();
            Effect::SpawnRequest
        }
        Action::Reload => {
            if state.is_loading {
                return Effect::None;
            }
            if !state.rewind_to_last_user() {
                debug!("Reload ignored: no user message to resend");
                return Effect::None;
            }
            info!("Reloading response ({} messages kept)", state.messages.len());
            state.start_response();
            Effect::SpawnRequest
        }
        Action::Stop => {
            if !state.is_loading {
                return Effect::None;
            }
            info!("Stopping response");
            state.finish_response();
            state.status_message = String::from("Stopped");
            Effect::CancelRequest
        }
        Action::ResponseChunk { request, text } => {
            if !state.is_current(request) {
                return Effect::None;
            }
            let streaming_into_last = state.streaming_id.is_some()
                && state.messages.last().map(|m| &m.id) == state.streaming_id.as_ref();
            if streaming_into_last && let Some(last) = state.messages.last_mut() {
                last.content.push_str(&text);
            } else {
                let message = Message::new(Role::Assistant, text);
                state.streaming_id = Some(message.id.clone());
                state.messages.push(message);
            }
            Effect::None
        }
        Action::ResponseDone(request) => {
            if state.is_current(request) {
                state.finish_response();
                state.status_message = String::from("Ready");
            }
            Effect::None
        }
        Action::ResponseFailed { request, error } => {
            if !state.is_current(request) {
                return Effect::None;
            }
            warn!("Response failed: {}", error);
            state.finish_response();
            state.status_message = format!("Error: {}", error);
            state.error = Some(error);
            Effect::None
        }
        Action::StartersLoaded(questions) => {
            state.starters.store(questions);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
