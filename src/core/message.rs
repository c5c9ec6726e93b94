//! # Messages
//!
//! The transcript's data model. Messages are owned by the chat state
//! ([`crate::core::chat::ChatState`]); the view only ever borrows them.

use serde::{Deserialize, Serialize};

/// Who authored a message.
///
/// Only `User` is special-cased by the view: every other role is rendered
/// and gated as an assistant reply.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
    /// Any role string the view does not recognize.
    #[serde(other)]
    Other,
}

impl Role {
    pub fn is_user(self) -> bool {
        matches!(self, Role::User)
    }

    /// Short label shown in the message border.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
            Role::Other => "other",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Creates a message with a fresh UUID v4 id.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
        }
    }
}

/// A message handed to `append`, before the chat state assigns it an id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub role: Role,
    pub content: String,
}

impl NewMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn into_message(self) -> Message {
        Message::new(self.role, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn unknown_role_deserializes_as_other() {
        let msg: Message =
            serde_json::from_str(r#"{"id":"1","role":"data","content":"x"}"#).unwrap();
        assert_eq!(msg.role, Role::Other);
        assert!(!msg.role.is_user());
    }

    #[test]
    fn new_messages_get_distinct_ids() {
        let a = Message::new(Role::User, "hi");
        let b = Message::new(Role::User, "hi");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn new_message_user_helper() {
        let msg = NewMessage::user("What can you do?").into_message();
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "What can you do?");
        assert!(!msg.id.is_empty());
    }
}
