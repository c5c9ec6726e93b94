//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Lay out message bubbles (user on the right, everyone else on the left)
//! - Cache bubble sizes between frames
//! - Jump to the bottom whenever the message count or the last message changes
//! - Show the pending spinner under the last message
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the messages (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Message as ChatMessage;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{BubbleSize, Message};
use crate::tui::components::spinner::{SPINNER_HEIGHT, Spinner};
use crate::tui::event::TuiEvent;

/// Vertical gap between consecutive bubbles.
const MESSAGE_GAP: u16 = 1;

/// What the auto-scroll watches: message count plus the last message's
/// identity. Streaming into the last message changes its length, which
/// counts as a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollKey {
    count: usize,
    last_id: Option<String>,
    last_len: usize,
}

impl ScrollKey {
    pub fn of(messages: &[ChatMessage]) -> Self {
        let last = messages.last();
        Self {
            count: messages.len(),
            last_id: last.map(|m| m.id.clone()),
            last_len: last.map_or(0, |m| m.content.len()),
        }
    }
}

/// Layout and scroll state for the message list.
/// Must be persisted in the parent state.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// Key seen on the previous frame; `None` before the first frame.
    last_key: Option<ScrollKey>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Canvas height of the previous frame, including the spinner rows.
    pub canvas_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            last_key: None,
            viewport_height: 0,
            canvas_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.canvas_height.saturating_sub(self.viewport_height)
    }

    /// Sets the offset to the full scroll height, clamped to the last page.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_state.set_offset(Position {
            x: 0,
            y: self.max_offset(),
        });
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Records the key for this frame. Returns true if it changed.
    fn observe(&mut self, key: ScrollKey) -> bool {
        if self.last_key.as_ref() == Some(&key) {
            return false;
        }
        self.last_key = Some(key);
        true
    }
}

/// Scrollable transcript component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [ChatMessage],
    pub is_pending: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [ChatMessage],
        is_pending: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            is_pending,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Update layout cache
        self.state.layout.update(self.messages, content_width);
        let messages_height = self.state.layout.total_height();
        let spinner_height = if self.is_pending { SPINNER_HEIGHT } else { 0 };

        self.state.viewport_height = area.height;
        self.state.canvas_height = messages_height.saturating_add(spinner_height);

        // 2. Auto-scroll on count / last-message change, otherwise just clamp
        if self.state.observe(ScrollKey::of(self.messages)) {
            self.state.scroll_to_bottom();
        } else {
            self.state.clamp_scroll();
        }

        if self.state.canvas_height == 0 {
            return;
        }

        // 3. Render bubbles into the scroll canvas
        let mut scroll_view = ScrollView::new(Size::new(content_width, self.state.canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (message, size) in self.messages.iter().zip(self.state.layout.sizes()) {
            let x = if message.role.is_user() {
                content_width.saturating_sub(size.width)
            } else {
                0
            };
            scroll_view.render_widget(
                Message::new(message),
                Rect::new(x, y_offset, size.width, size.height),
            );
            y_offset = y_offset
                .saturating_add(size.height)
                .saturating_add(MESSAGE_GAP);
        }

        if self.is_pending {
            let spinner_area = Rect::new(0, messages_height, content_width, SPINNER_HEIGHT);
            scroll_view.render_widget(Spinner::new(self.spinner_frame), spinner_area);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

/// Cached bubble sizes, keyed by message id.
pub struct LayoutCache {
    entries: Vec<(String, BubbleSize)>,
    row_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            row_width: 0,
        }
    }

    /// Number of leading entries still valid for `messages` at `row_width`.
    ///
    /// The last message is never reused: it may still be streaming.
    pub fn reusable_count(&self, messages: &[ChatMessage], row_width: u16) -> usize {
        if self.row_width != row_width {
            return 0;
        }
        let matching = self
            .entries
            .iter()
            .zip(messages)
            .take_while(|((id, _), m)| *id == m.id)
            .count();
        matching.min(messages.len().saturating_sub(1))
    }

    pub fn update(&mut self, messages: &[ChatMessage], row_width: u16) {
        let reusable = self.reusable_count(messages, row_width);
        self.entries.truncate(reusable);
        for message in &messages[reusable..] {
            self.entries
                .push((message.id.clone(), Message::measure(message, row_width)));
        }
        self.row_width = row_width;
    }

    pub fn sizes(&self) -> impl Iterator<Item = BubbleSize> + '_ {
        self.entries.iter().map(|(_, size)| *size)
    }

    /// Height of all bubbles plus the gaps after each one.
    /// Saturates at `u16::MAX`, the tallest canvas the scroll view can hold.
    pub fn total_height(&self) -> u16 {
        self.sizes().fold(0u16, |total, s| {
            total.saturating_add(s.height).saturating_add(MESSAGE_GAP)
        })
    }
}
