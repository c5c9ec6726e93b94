//! # Transcript Component
//!
//! The chat view proper: message list, pending spinner, action bar and
//! starter grid, composed the way the flags in [`crate::core::transcript`]
//! dictate.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ MessageList (+ Spinner)      │
//! │                              │
//! │   StarterGrid (empty only)   │
//! ├──────────────────────────────┤
//! │             ActionBar        │  only when reload or stop is shown
//! └──────────────────────────────┘
//! ```
//!
//! Everything the user can trigger comes out as a [`TranscriptEvent`]; the
//! parent maps those onto the chat state.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::message::{Message as ChatMessage, NewMessage};
use crate::core::transcript::{Capabilities, TranscriptFlags, show_starters};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::action_bar::{ACTION_BAR_HEIGHT, ActionBar, ActionBarState, ActionButton};
use crate::tui::components::message_list::{MessageList, MessageListState};
use crate::tui::components::starter_grid::{StarterGrid, StarterGridState};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEvent {
    Reload,
    Stop,
    Append(NewMessage),
}

/// Persistent state for the transcript view. Dropping it discards scroll
/// position, hit areas and focus.
pub struct TranscriptState {
    pub message_list: MessageListState,
    pub action_bar: ActionBarState,
    pub starter_grid: StarterGridState,
    /// Flags as of the last frame; events are gated on what is on screen.
    pub flags: TranscriptFlags,
    pub starters_visible: bool,
}

impl Default for TranscriptState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            action_bar: ActionBarState::new(),
            starter_grid: StarterGridState::new(),
            flags: TranscriptFlags::default(),
            starters_visible: false,
        }
    }
}

pub struct Transcript<'a> {
    pub state: &'a mut TranscriptState,
    pub messages: &'a [ChatMessage],
    pub is_loading: bool,
    pub capabilities: Capabilities,
    pub starters: &'a [String],
    pub spinner_frame: usize,
}

impl<'a> Transcript<'a> {
    pub fn new(
        state: &'a mut TranscriptState,
        messages: &'a [ChatMessage],
        is_loading: bool,
        capabilities: Capabilities,
        starters: &'a [String],
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            is_loading,
            capabilities,
            starters,
            spinner_frame,
        }
    }
}

impl<'a> Component for Transcript<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let flags = TranscriptFlags::derive(self.messages, self.is_loading, self.capabilities);
        let starters_visible = show_starters(self.messages, self.starters, self.capabilities);
        self.state.flags = flags;
        self.state.starters_visible = starters_visible;

        let bar_height = if flags.show_action_bar() {
            ACTION_BAR_HEIGHT
        } else {
            0
        };
        let [list_area, bar_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(bar_height)]).areas(area);

        MessageList::new(
            &mut self.state.message_list,
            self.messages,
            flags.is_pending,
            self.spinner_frame,
        )
        .render(frame, list_area);

        if flags.show_action_bar() {
            ActionBar::new(&mut self.state.action_bar, flags).render(frame, bar_area);
        } else {
            self.state.action_bar.clear();
        }

        if starters_visible {
            StarterGrid::new(&mut self.state.starter_grid, self.starters).render(frame, list_area);
        } else {
            self.state.starter_grid.hide();
        }
    }
}

impl EventHandler for TranscriptState {
    type Event = TranscriptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Reload => self.flags.show_reload.then_some(TranscriptEvent::Reload),
            TuiEvent::Escape if self.flags.show_stop => Some(TranscriptEvent::Stop),
            TuiEvent::Escape => {
                self.starter_grid.focused = None;
                None
            }
            TuiEvent::MouseClick(column, row) => {
                if let Some(button) = self.action_bar.hit_test(*column, *row) {
                    return Some(match button {
                        ActionButton::Reload => TranscriptEvent::Reload,
                        ActionButton::Stop => TranscriptEvent::Stop,
                    });
                }
                if self.starters_visible {
                    return self.starter_grid.handle_event(event).map(TranscriptEvent::Append);
                }
                None
            }
            TuiEvent::FocusNext | TuiEvent::FocusPrevious | TuiEvent::Submit
                if self.starters_visible =>
            {
                self.starter_grid.handle_event(event).map(TranscriptEvent::Append)
            }
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => {
                self.message_list.handle_event(event);
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    struct Fixture {
        terminal: Terminal<TestBackend>,
        state: TranscriptState,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                terminal: Terminal::new(TestBackend::new(80, 20)).unwrap(),
                state: TranscriptState::new(),
            }
        }

        fn draw(
            &mut self,
            messages: &[ChatMessage],
            is_loading: bool,
            caps: Capabilities,
            starters: &[String],
        ) -> String {
            let state = &mut self.state;
            self.terminal
                .draw(|f| {
                    Transcript::new(state, messages, is_loading, caps, starters, 0)
                        .render(f, f.area())
                })
                .unwrap();
            self.terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(|c| c.symbol())
                .collect()
        }
    }

    fn user(content: &str) -> ChatMessage {
        ChatMessage::new(Role::User, content)
    }

    fn assistant(content: &str) -> ChatMessage {
        ChatMessage::new(Role::Assistant, content)
    }

    fn starters() -> Vec<String> {
        vec!["What can you do?".to_string(), "Summarize the top pools".to_string()]
    }

    #[test]
    fn empty_idle_has_no_spinner_or_action_bar() {
        let mut fx = Fixture::new();
        let text = fx.draw(&[], false, Capabilities::all(), &[]);
        assert!(!text.contains('⠋'));
        assert!(!text.contains("Reload"));
        assert!(!text.contains("Stop"));
        assert!(text.trim().is_empty());
    }

    #[test]
    fn pending_shows_spinner_and_stop() {
        let mut fx = Fixture::new();
        let text = fx.draw(&[user("hi")], true, Capabilities::all(), &[]);
        assert!(text.contains('⠋'));
        assert!(text.contains("Stop"));
        assert!(!text.contains("Reload"));
    }

    #[test]
    fn pending_without_stop_capability_has_spinner_only() {
        let mut fx = Fixture::new();
        let caps = Capabilities {
            stop: false,
            ..Capabilities::all()
        };
        let text = fx.draw(&[user("hi")], true, caps, &[]);
        assert!(text.contains('⠋'));
        assert!(!text.contains("Stop"));
        assert_eq!(fx.state.handle_event(&TuiEvent::Escape), None);
    }

    #[test]
    fn finished_reply_offers_reload() {
        let mut fx = Fixture::new();
        let text = fx.draw(&[user("hi"), assistant("hello")], false, Capabilities::all(), &[]);
        assert!(text.contains("Reload"));
        assert!(!text.contains('⠋'));
        assert_eq!(
            fx.state.handle_event(&TuiEvent::Reload),
            Some(TranscriptEvent::Reload)
        );
    }

    #[test]
    fn reload_key_ignored_when_not_shown() {
        let mut fx = Fixture::new();
        fx.draw(&[user("hi"), assistant("hel")], true, Capabilities::all(), &[]);
        assert_eq!(fx.state.handle_event(&TuiEvent::Reload), None);
        assert_eq!(fx.state.handle_event(&TuiEvent::Escape), Some(TranscriptEvent::Stop));
    }

    #[test]
    fn clicking_stop_button_emits_stop() {
        let mut fx = Fixture::new();
        fx.draw(&[user("hi")], true, Capabilities::all(), &[]);
        // Action bar occupies the last 3 rows, buttons flush right
        assert_eq!(
            fx.state.handle_event(&TuiEvent::MouseClick(78, 18)),
            Some(TranscriptEvent::Stop)
        );
    }

    #[test]
    fn no_grid_without_starters() {
        let mut fx = Fixture::new();
        fx.draw(&[], false, Capabilities::all(), &[]);
        assert!(!fx.state.starters_visible);
        assert_eq!(fx.state.handle_event(&TuiEvent::FocusNext), None);
    }

    #[test]
    fn no_grid_without_append() {
        let mut fx = Fixture::new();
        let caps = Capabilities {
            append: false,
            ..Capabilities::all()
        };
        let text = fx.draw(&[], false, caps, &starters());
        assert!(!text.contains("What can you do?"));
    }

    #[test]
    fn no_grid_once_conversation_started() {
        let mut fx = Fixture::new();
        let text = fx.draw(&[user("hello")], false, Capabilities::all(), &starters());
        assert!(!text.contains("What can you do?"));
    }

    #[test]
    fn clicking_starter_appends_user_message() {
        let mut fx = Fixture::new();
        let text = fx.draw(&[], false, Capabilities::all(), &starters());
        assert!(text.contains("What can you do?"));

        // Two buttons on one row, 1 margin row below: button rows 16..19
        let event = fx.state.handle_event(&TuiEvent::MouseClick(5, 17));
        assert_eq!(
            event,
            Some(TranscriptEvent::Append(NewMessage {
                role: Role::User,
                content: "What can you do?".to_string(),
            }))
        );
    }

    #[test]
    fn submit_passes_through_when_no_starter_focused() {
        let mut fx = Fixture::new();
        fx.draw(&[], false, Capabilities::all(), &starters());
        assert_eq!(fx.state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn scroll_resets_to_bottom_on_new_message() {
        let mut fx = Fixture::new();
        let mut messages: Vec<_> = (0..10).map(|i| user(&format!("line {i}"))).collect();
        fx.draw(&messages, false, Capabilities::none(), &[]);
        fx.state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(fx.state.message_list.scroll_state.offset().y < fx.state.message_list.canvas_height - 20);

        messages.push(assistant("reply"));
        fx.draw(&messages, false, Capabilities::none(), &[]);
        let list = &fx.state.message_list;
        assert_eq!(list.scroll_state.offset().y, list.canvas_height - list.viewport_height);
    }
}
