//! Animated pending indicator.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Widget};

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Rows the spinner occupies: one blank row above the glyph, one below.
pub const SPINNER_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    pub frame: usize,
}

impl Spinner {
    pub fn new(frame: usize) -> Self {
        Self { frame }
    }

    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame % FRAMES.len()]
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let row = Rect {
            y: area.y + area.height / 2,
            height: 1,
            ..area
        };
        Paragraph::new(self.glyph())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(row, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_cycles() {
        assert_eq!(Spinner::new(0).glyph(), Spinner::new(FRAMES.len()).glyph());
        assert_ne!(Spinner::new(0).glyph(), Spinner::new(1).glyph());
    }
}
