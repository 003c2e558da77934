use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message, Sender};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles take at most this share of the list width (percent).
const MAX_BUBBLE_PERCENT: u16 = 75;
/// Below this list width bubbles use the full width.
const MIN_BUBBLE_WIDTH: u16 = 24;

/// A stateless component that renders one transcript entry as a bubble.
///
/// `MessageBubble` is transient: created each frame by `MessageList` for the
/// visible messages only.
///
/// # Layout
///
/// User bubbles hug the right edge, bot and system bubbles the left edge.
/// Bubble width is capped at 75% of the list width so the two sides stay
/// visually distinct.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap`, using options that match `Paragraph` wrapping, so the
/// list can lay out the scroll canvas without rendering every message.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    /// Title shown on bot bubbles.
    pub bot_label: &'a str,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, bot_label: &'a str) -> Self {
        Self { message, bot_label }
    }

    /// Width of a bubble inside a list of `list_width` columns.
    pub fn bubble_width(list_width: u16) -> u16 {
        if list_width <= MIN_BUBBLE_WIDTH {
            return list_width;
        }
        let capped = u32::from(list_width) * u32::from(MAX_BUBBLE_PERCENT) / 100;
        (capped as u16).max(MIN_BUBBLE_WIDTH)
    }

    /// Calculate the height required for `message` in a list `list_width` wide.
    pub fn calculate_height(message: &Message, list_width: u16) -> u16 {
        let content_width = Self::bubble_width(list_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = message.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    /// The rect the bubble occupies inside a full-width row `area`.
    pub fn bubble_rect(sender: Sender, area: Rect) -> Rect {
        let width = Self::bubble_width(area.width);
        let x = match sender {
            Sender::User => area.x + area.width.saturating_sub(width),
            Sender::Bot | Sender::System => area.x,
        };
        Rect::new(x, area.y, width, area.height)
    }

    fn title(&self) -> &'a str {
        match self.message.sender {
            Sender::User => "you",
            Sender::Bot => self.bot_label,
            Sender::System => "error",
        }
    }
}

pub fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Cyan),
        Sender::Bot => Style::default().fg(Color::Green),
        Sender::System => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::ITALIC),
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = sender_style(self.message.sender);
        let bubble = Self::bubble_rect(self.message.sender, area);

        let mut block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        if self.message.sender == Sender::User {
            block = block.title_alignment(ratatui::layout::Alignment::Right);
        }

        let inner_area = block.inner(bubble);
        block.render(bubble, buf);

        Paragraph::new(self.message.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn bubble_width_is_three_quarters() {
        assert_eq!(MessageBubble::bubble_width(80), 60);
        assert_eq!(MessageBubble::bubble_width(40), 30);
    }

    #[test]
    fn bubble_width_narrow_list_uses_full_width() {
        assert_eq!(MessageBubble::bubble_width(20), 20);
        assert_eq!(MessageBubble::bubble_width(0), 0);
        // Never shrinks below the minimum once the list is wide enough
        assert_eq!(MessageBubble::bubble_width(28), MIN_BUBBLE_WIDTH);
    }

    #[test]
    fn bubble_width_on_very_wide_terminals() {
        assert_eq!(MessageBubble::bubble_width(874), 655);
        assert_eq!(MessageBubble::bubble_width(u16::MAX), 49151);
    }

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        let message = Message::bot("   \n\t ");
        assert_eq!(MessageBubble::calculate_height(&message, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let message = Message::user("Hello world");
        assert_eq!(MessageBubble::calculate_height(&message, 0), 1);
    }

    #[test]
    fn calculate_height_single_line_fits() {
        let message = Message::user("Hello");
        assert_eq!(
            MessageBubble::calculate_height(&message, 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_wraps_at_bubble_width() {
        // list 12 → bubble 12 → content 8: "Hello" | "world"
        let message = Message::bot("Hello world");
        assert_eq!(
            MessageBubble::calculate_height(&message, 12),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_keeps_newlines() {
        let message = Message::bot("one\ntwo\nthree");
        assert_eq!(
            MessageBubble::calculate_height(&message, 80),
            3 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn user_bubble_hugs_right_edge() {
        let area = Rect::new(0, 0, 80, 3);
        let user = MessageBubble::bubble_rect(Sender::User, area);
        let bot = MessageBubble::bubble_rect(Sender::Bot, area);
        assert_eq!(user.x + user.width, 80);
        assert_eq!(bot.x, 0);
        assert_eq!(user.width, bot.width);
    }

    #[test]
    fn system_style_is_distinct() {
        assert_ne!(sender_style(Sender::System), sender_style(Sender::Bot));
        assert_eq!(sender_style(Sender::System).fg, Some(Color::Red));
    }

    #[test]
    fn render_shows_titles_and_text() {
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let user = Message::user("ping");
        let bot = Message::bot("pong");

        terminal
            .draw(|f| {
                f.render_widget(MessageBubble::new(&user, "rag"), Rect::new(0, 0, 40, 3));
                f.render_widget(MessageBubble::new(&bot, "rag"), Rect::new(0, 3, 40, 3));
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("you"));
        assert!(text.contains("ping"));
        assert!(text.contains("rag"));
        assert!(text.contains("pong"));
    }
}
