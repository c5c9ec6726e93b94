use serde::{Deserialize, Serialize};

use crate::core::message::{Message, Role};

/// Response body of `GET <backend>/api/chat/config`.
///
/// Only `starterQuestions` is read; anything else the backend sends is ignored.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ClientConfig {
    #[serde(rename = "starterQuestions", default)]
    pub starter_questions: Option<Vec<String>>,
}

impl ClientConfig {
    /// The starter list, if present and non-empty.
    pub fn non_empty_starters(self) -> Option<Vec<String>> {
        self.starter_questions.filter(|q| !q.is_empty())
    }
}

/// A single message in the chat request body.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Body of `POST <backend>/api/chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn from_messages(messages: &[Message]) -> Self {
        Self {
            messages: messages.iter().map(ChatMessage::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_reads_starter_questions() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"starterQuestions":["a","b"],"other":1}"#).unwrap();
        assert_eq!(config.non_empty_starters(), Some(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn config_without_field_has_no_starters() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.non_empty_starters(), None);
    }

    #[test]
    fn empty_starter_list_is_none() {
        let config: ClientConfig = serde_json::from_str(r#"{"starterQuestions":[]}"#).unwrap();
        assert_eq!(config.non_empty_starters(), None);
    }

    #[test]
    fn null_starter_list_is_none() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"starterQuestions":null}"#).unwrap();
        assert_eq!(config.non_empty_starters(), None);
    }

    #[test]
    fn chat_request_drops_ids() {
        let messages = vec![Message::new(Role::User, "hi")];
        let body = serde_json::to_value(ChatRequest::from_messages(&messages)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"messages": [{"role": "user", "content": "hi"}]})
        );
    }
}
