//! # StarterGrid Component
//!
//! Two-column grid of suggested first questions, anchored to the bottom of
//! the transcript area. Picking one appends it as a user message.
//!
//! The grid remembers the buttons it drew last frame, so clicks and Tab focus
//! work against exactly what is on screen.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::message::NewMessage;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const COLUMNS: usize = 2;
const BUTTON_HEIGHT: u16 = 3;
/// Blank rows kept between the grid and the bottom of its area.
const BOTTOM_MARGIN: u16 = 1;

#[derive(Debug, Default)]
pub struct StarterGridState {
    /// Button focused with Tab, if any.
    pub focused: Option<usize>,
    buttons: Vec<(String, Rect)>,
}

impl StarterGridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_focused(&self) -> bool {
        self.focused.is_some()
    }

    /// Forget what was drawn. Called when the grid is not shown this frame.
    pub fn hide(&mut self) {
        self.buttons.clear();
        self.focused = None;
    }

    fn pick(&self, index: usize) -> Option<NewMessage> {
        self.buttons
            .get(index)
            .map(|(question, _)| NewMessage::user(question.clone()))
    }

    fn cycle(&mut self, forward: bool) {
        let count = self.buttons.len();
        if count == 0 {
            self.focused = None;
            return;
        }
        // None sits between the last and the first button
        self.focused = match (self.focused, forward) {
            (None, true) => Some(0),
            (None, false) => Some(count - 1),
            (Some(i), true) if i + 1 < count => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };
    }
}

/// Rows needed for `count` questions, excluding the bottom margin.
pub fn grid_height(count: usize) -> u16 {
    (count.div_ceil(COLUMNS) as u16) * BUTTON_HEIGHT
}

/// Truncates `text` to `width` display columns, ending in `…` if cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub struct StarterGrid<'a> {
    pub state: &'a mut StarterGridState,
    pub questions: &'a [String],
}

impl<'a> StarterGrid<'a> {
    pub fn new(state: &'a mut StarterGridState, questions: &'a [String]) -> Self {
        Self { state, questions }
    }
}

impl<'a> Component for StarterGrid<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.buttons.clear();
        if self.questions.is_empty() {
            self.state.focused = None;
            return;
        }

        let height = grid_height(self.questions.len()).min(area.height.saturating_sub(BOTTOM_MARGIN));
        let grid_area = Rect {
            y: area.bottom().saturating_sub(height + BOTTOM_MARGIN),
            height,
            ..area
        };

        let row_count = self.questions.len().div_ceil(COLUMNS);
        let rows = Layout::vertical(vec![Constraint::Length(BUTTON_HEIGHT); row_count]).split(grid_area);

        for (row_idx, row_area) in rows.iter().enumerate() {
            let cells = Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .spacing(1)
                .split(*row_area);
            for (col_idx, cell) in cells.iter().enumerate() {
                let index = row_idx * COLUMNS + col_idx;
                let Some(question) = self.questions.get(index) else {
                    break;
                };
                if cell.height < BUTTON_HEIGHT {
                    continue;
                }

                let mut style = Style::default().fg(Color::White);
                if self.state.focused == Some(index) {
                    style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
                }
                let label = truncate_to_width(question, cell.width.saturating_sub(4) as usize);
                let block = Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style);
                frame.render_widget(
                    Paragraph::new(label).style(style).centered().block(block),
                    *cell,
                );
                self.state.buttons.push((question.clone(), *cell));
            }
        }

        if self.state.focused.is_some_and(|i| i >= self.state.buttons.len()) {
            self.state.focused = None;
        }
    }
}

impl EventHandler for StarterGridState {
    type Event = NewMessage;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::FocusNext => {
                self.cycle(true);
                None
            }
            TuiEvent::FocusPrevious => {
                self.cycle(false);
                None
            }
            TuiEvent::Submit => self.focused.and_then(|i| self.pick(i)),
            TuiEvent::MouseClick(column, row) => {
                let hit = self
                    .buttons
                    .iter()
                    .position(|(_, rect)| rect.contains(Position::new(*column, *row)))?;
                self.pick(hit)
            }
            _ => None,
        }
    }
}
