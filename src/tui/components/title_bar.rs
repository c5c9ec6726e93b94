//! # TitleBar Component
//!
//! One-line header: app name, backend, and the chat status.
//!
//! Stateless. All three props come from elsewhere (backend from config,
//! status from `ChatState`) and the bar just formats them:
//!
//! 1. **Status**: `"chatview · http://localhost:8000 | Thinking..."`
//! 2. **No status**: `"chatview · http://localhost:8000"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar<'a> {
    pub backend: &'a str,
    pub status_message: &'a str,
    pub is_error: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(backend: &'a str, status_message: &'a str, is_error: bool) -> Self {
        Self {
            backend,
            status_message,
            is_error,
        }
    }

    pub fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!("chatview · {}", self.backend)
        } else {
            format!("chatview · {} | {}", self.backend, self.status_message)
        }
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(Line::from(Span::styled(self.text(), style)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_title_with_status() {
        let bar = TitleBar::new("http://localhost:8000", "Thinking...", false);
        assert_eq!(bar.text(), "chatview · http://localhost:8000 | Thinking...");
    }

    #[test]
    fn test_title_without_status() {
        let bar = TitleBar::new("http://b", "", false);
        assert_eq!(bar.text(), "chatview · http://b");
        assert!(!bar.text().contains('|'));
    }

    #[test]
    fn test_title_renders() {
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        let mut bar = TitleBar::new("http://b", "Error: HTTP 500", true);
        terminal.draw(|f| bar.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("HTTP 500"));
        assert_eq!(buffer[(0, 0)].fg, Color::Red);
    }
}
