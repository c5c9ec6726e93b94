use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::message::{Message as ChatMessage, Role};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// A bubble never takes more than this share of the row.
const MAX_WIDTH_PERCENT: u16 = 80;

/// Size of a message bubble for a given row width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleSize {
    pub width: u16,
    pub height: u16,
}

/// A stateless component rendering one chat message as a bordered bubble.
///
/// User messages sit on the right in blue; every other role sits on the left
/// in gray, titled with its role.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    fn wrap_options(width: usize) -> textwrap::Options<'static> {
        textwrap::Options::new(width)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace)
    }

    /// Predicts the bubble size without rendering.
    ///
    /// Wrapping options match Ratatui's `Paragraph` wrapping so the predicted
    /// height equals the rendered one.
    pub fn measure(message: &ChatMessage, row_width: u16) -> BubbleSize {
        // u32: the product overflows u16 past 819 columns
        let capped = u32::from(row_width) * u32::from(MAX_WIDTH_PERCENT) / 100;
        let max_width = u16::try_from(capped)
            .unwrap_or(u16::MAX)
            .max(HORIZONTAL_OVERHEAD + 1);
        let max_width = max_width.min(row_width);
        let content_width = max_width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding
            return BubbleSize {
                width: row_width,
                height: 1,
            };
        }

        let content = message.content.trim();
        let title_width = message.role.label().width() as u16;
        if content.is_empty() {
            return BubbleSize {
                width: (title_width + 2).max(HORIZONTAL_OVERHEAD + 1).min(max_width),
                height: VERTICAL_OVERHEAD,
            };
        }

        let lines = textwrap::wrap(content, Self::wrap_options(content_width as usize));
        let widest = lines.iter().map(|l| l.width() as u16).max().unwrap_or(0);
        let width = widest
            .saturating_add(HORIZONTAL_OVERHEAD)
            .max(title_width + 2)
            .min(max_width);
        let line_count = u16::try_from(lines.len()).unwrap_or(u16::MAX).max(1);

        BubbleSize {
            width,
            height: line_count.saturating_add(VERTICAL_OVERHEAD),
        }
    }

    pub fn style(role: Role) -> Style {
        match role {
            Role::User => Style::default().fg(Color::Blue),
            _ => Style::default().fg(Color::Gray),
        }
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Self::style(self.message.role);
        let block = Block::bordered()
            .title(self.message.role.label())
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.content.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(role: Role, content: &str) -> ChatMessage {
        ChatMessage {
            id: "m1".to_string(),
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn measure_empty_content_is_border_height() {
        let size = Message::measure(&make(Role::User, "   \n"), 80);
        assert_eq!(size.height, VERTICAL_OVERHEAD);
    }

    #[test]
    fn measure_short_message_shrinks_to_content() {
        let size = Message::measure(&make(Role::Assistant, "Hello"), 80);
        assert_eq!(size.height, 1 + VERTICAL_OVERHEAD);
        // title "assistant" (9) + 2 corners beats "Hello" (5) + overhead (4)
        assert_eq!(size.width, 11);
    }

    #[test]
    fn measure_caps_width_at_eighty_percent() {
        let long = "word ".repeat(40);
        let size = Message::measure(&make(Role::User, &long), 100);
        assert!(size.width <= 80);
        assert!(size.height > 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn measure_breaks_long_words() {
        // Row 10 → max bubble 8 → content width 4: "abcd" | "efgh" | "ij"
        let size = Message::measure(&make(Role::User, "abcdefghij"), 10);
        assert_eq!(size.height, 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn measure_very_wide_row() {
        let size = Message::measure(&make(Role::User, "hi"), 1000);
        assert_eq!(size.height, 1 + VERTICAL_OVERHEAD);

        let long = "word ".repeat(400);
        let size = Message::measure(&make(Role::Assistant, &long), 1000);
        assert!(size.width <= 800);
        assert!(size.width > 700, "cap is 80% of 1000, got {}", size.width);

        let size = Message::measure(&make(Role::Assistant, &long), u16::MAX);
        assert_eq!(size.height, 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn measure_saturates_huge_line_counts() {
        let huge = "x\n".repeat(70_000);
        let size = Message::measure(&make(Role::Assistant, &huge), 40);
        assert_eq!(size.height, u16::MAX);
    }

    #[test]
    fn measure_degenerate_width() {
        let size = Message::measure(&make(Role::User, "hi"), 3);
        assert_eq!(size.height, 1);
    }

    #[test]
    fn user_and_assistant_styles_differ() {
        assert_eq!(Message::style(Role::User).fg, Some(Color::Blue));
        assert_eq!(Message::style(Role::Assistant).fg, Some(Color::Gray));
        assert_eq!(Message::style(Role::Other), Message::style(Role::Assistant));
    }
}
