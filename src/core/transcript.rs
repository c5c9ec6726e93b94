//! # Transcript Flags
//!
//! Everything the transcript view decides about its controls is a pure
//! function of the message list, the loading flag, and which optional
//! capabilities the caller supplied. Nothing here is stored between frames.
//!
//! ```text
//! last_from_assistant = !messages.is_empty() && last.role != User
//! show_reload         = reload && !loading && last_from_assistant
//! show_stop           = stop && loading
//! is_pending          = loading && !last_from_assistant
//! ```

use crate::core::message::Message;

/// Which optional callbacks the caller wired up.
///
/// A missing capability suppresses its control and its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub reload: bool,
    pub stop: bool,
    pub append: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

impl Capabilities {
    pub fn all() -> Self {
        Self {
            reload: true,
            stop: true,
            append: true,
        }
    }

    pub fn none() -> Self {
        Self {
            reload: false,
            stop: false,
            append: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranscriptFlags {
    pub is_last_message_from_assistant: bool,
    pub show_reload: bool,
    pub show_stop: bool,
    /// A response was requested but nothing has streamed back yet.
    pub is_pending: bool,
}

impl TranscriptFlags {
    pub fn derive(messages: &[Message], is_loading: bool, caps: Capabilities) -> Self {
        let is_last_message_from_assistant = messages.last().is_some_and(|m| !m.role.is_user());

        Self {
            is_last_message_from_assistant,
            show_reload: caps.reload && !is_loading && is_last_message_from_assistant,
            show_stop: caps.stop && is_loading,
            is_pending: is_loading && !is_last_message_from_assistant,
        }
    }

    pub fn show_action_bar(&self) -> bool {
        self.show_reload || self.show_stop
    }
}

/// The starter grid only appears before the conversation starts, and only if
/// there is something to show and somewhere to send it.
pub fn show_starters(messages: &[Message], starters: &[String], caps: Capabilities) -> bool {
    messages.is_empty() && !starters.is_empty() && caps.append
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;

    fn msgs(roles: &[Role]) -> Vec<Message> {
        roles.iter().map(|r| Message::new(*r, "x")).collect()
    }

    #[test]
    fn empty_idle_shows_nothing() {
        let flags = TranscriptFlags::derive(&[], false, Capabilities::all());
        assert!(!flags.is_last_message_from_assistant);
        assert!(!flags.is_pending);
        assert!(!flags.show_reload);
        assert!(!flags.show_stop);
        assert!(!flags.show_action_bar());
    }

    #[test]
    fn user_last_while_loading_is_pending() {
        let messages = msgs(&[Role::User]);
        let flags = TranscriptFlags::derive(&messages, true, Capabilities::all());
        assert!(flags.is_pending);
        assert!(flags.show_stop);
        assert!(!flags.show_reload);
    }

    #[test]
    fn pending_without_stop_capability_has_no_action_bar() {
        let messages = msgs(&[Role::User]);
        let caps = Capabilities {
            stop: false,
            ..Capabilities::all()
        };
        let flags = TranscriptFlags::derive(&messages, true, caps);
        assert!(flags.is_pending);
        assert!(!flags.show_action_bar());
    }

    #[test]
    fn assistant_last_idle_offers_reload() {
        let messages = msgs(&[Role::User, Role::Assistant]);
        let flags = TranscriptFlags::derive(&messages, false, Capabilities::all());
        assert!(flags.is_last_message_from_assistant);
        assert!(flags.show_reload);
        assert!(!flags.show_stop);
        assert!(!flags.is_pending);
    }

    #[test]
    fn reload_requires_capability() {
        let messages = msgs(&[Role::User, Role::Assistant]);
        let flags = TranscriptFlags::derive(&messages, false, Capabilities::none());
        assert!(!flags.show_reload);
    }

    #[test]
    fn streaming_assistant_is_not_pending() {
        let messages = msgs(&[Role::User, Role::Assistant]);
        let flags = TranscriptFlags::derive(&messages, true, Capabilities::all());
        assert!(!flags.is_pending);
        assert!(flags.show_stop);
        assert!(!flags.show_reload);
    }

    #[test]
    fn any_non_user_role_counts_as_assistant() {
        let messages = msgs(&[Role::User, Role::Other]);
        let flags = TranscriptFlags::derive(&messages, false, Capabilities::all());
        assert!(flags.is_last_message_from_assistant);
    }

    #[test]
    fn starters_hidden_when_empty_list() {
        assert!(!show_starters(&[], &[], Capabilities::all()));
    }

    #[test]
    fn starters_need_empty_transcript_and_append() {
        let starters = vec!["What is this?".to_string()];
        assert!(show_starters(&[], &starters, Capabilities::all()));
        assert!(!show_starters(&[], &starters, Capabilities::none()));
        assert!(!show_starters(&msgs(&[Role::User]), &starters, Capabilities::all()));
    }
}
