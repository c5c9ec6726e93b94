//! # Composer Component
//!
//! Single-line text input under the transcript. Enter submits the buffer;
//! the parent decides whether that becomes an append.
//!
//! The buffer is internal state. `enabled` is a prop: while a reply is
//! pending, or without the append capability, the composer still renders and
//! accepts typing but refuses to submit.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const COMPOSER_HEIGHT: u16 = 3;

/// High-level events emitted by the Composer
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    Submit(String),
    ContentChanged,
}

pub struct Composer {
    pub buffer: String,
    /// Cursor position as a byte offset into `buffer`.
    cursor: usize,
    pub enabled: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}

impl Composer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            enabled: true,
        }
    }

    /// Display column of the cursor and the column the view starts at, so the
    /// cursor stays visible in `width` columns.
    fn view_window(&self, width: u16) -> (usize, usize) {
        let cursor_col = self.buffer[..self.cursor].width();
        let width = width as usize;
        let start = if width == 0 {
            0
        } else {
            cursor_col.saturating_sub(width.saturating_sub(1))
        };
        (cursor_col, start)
    }

    fn visible_text(&self, width: u16) -> String {
        let (_, start) = self.view_window(width);
        let mut col = 0;
        let mut out = String::new();
        for c in self.buffer.chars() {
            let w = c.width().unwrap_or(0);
            if col >= start && col + w <= start + width as usize {
                out.push(c);
            }
            col += w;
        }
        out
    }
}

impl Component for Composer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (title, style) = if self.enabled {
            ("Message (Enter to send)", Style::default().fg(Color::Green))
        } else {
            (
                "Message (sending disabled)",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title)
            .border_style(style);
        let inner = block.inner(area);

        frame.render_widget(
            Paragraph::new(self.visible_text(inner.width))
                .style(style)
                .block(block),
            area,
        );

        if self.enabled && inner.width > 0 && inner.height > 0 {
            let (cursor_col, start) = self.view_window(inner.width);
            let x = inner.x + (cursor_col - start) as u16;
            frame.set_cursor_position((x, inner.y));
        }
    }
}

impl EventHandler for Composer {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit if self.enabled && !self.buffer.trim().is_empty() => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(ComposerEvent::Submit(text.trim().to_string()))
            }
            _ => None,
        }
    }
}
