//! # ActionBar Component
//!
//! Right-aligned Reload / Stop buttons under the transcript. Which buttons
//! exist is decided by [`TranscriptFlags`]; this component only draws them
//! and remembers where they landed for mouse hit-testing.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::transcript::TranscriptFlags;
use crate::tui::component::Component;

pub const ACTION_BAR_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    Reload,
    Stop,
}

impl ActionButton {
    fn label(self) -> &'static str {
        match self {
            ActionButton::Reload => "↻ Reload (Ctrl+R)",
            ActionButton::Stop => "■ Stop (Esc)",
        }
    }

    fn color(self) -> Color {
        match self {
            ActionButton::Reload => Color::Cyan,
            ActionButton::Stop => Color::Red,
        }
    }
}

/// Where each button was drawn on the last frame.
#[derive(Debug, Default)]
pub struct ActionBarState {
    hit_areas: Vec<(ActionButton, Rect)>,
}

impl ActionBarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<ActionButton> {
        self.hit_areas
            .iter()
            .find(|(_, rect)| rect.contains(Position::new(column, row)))
            .map(|(button, _)| *button)
    }

    pub fn clear(&mut self) {
        self.hit_areas.clear();
    }
}

pub struct ActionBar<'a> {
    pub state: &'a mut ActionBarState,
    pub flags: TranscriptFlags,
}

impl<'a> ActionBar<'a> {
    pub fn new(state: &'a mut ActionBarState, flags: TranscriptFlags) -> Self {
        Self { state, flags }
    }

    pub fn buttons(flags: TranscriptFlags) -> Vec<ActionButton> {
        let mut buttons = Vec::with_capacity(2);
        if flags.show_reload {
            buttons.push(ActionButton::Reload);
        }
        if flags.show_stop {
            buttons.push(ActionButton::Stop);
        }
        buttons
    }
}

impl<'a> Component for ActionBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.clear();
        let buttons = Self::buttons(self.flags);
        if buttons.is_empty() {
            return;
        }

        let constraints = buttons
            .iter()
            .map(|b| Constraint::Length(b.label().width() as u16 + 4));
        let areas = Layout::horizontal(constraints)
            .flex(Flex::End)
            .spacing(1)
            .split(area);

        for (button, rect) in buttons.into_iter().zip(areas.iter().copied()) {
            let style = Style::default().fg(button.color());
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(style);
            frame.render_widget(
                Paragraph::new(button.label()).style(style).centered().block(block),
                rect,
            );
            self.state.hit_areas.push((button, rect));
        }
    }
}
