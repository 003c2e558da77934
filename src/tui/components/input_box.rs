//! # InputBox Component
//!
//! Single-row text field for the draft.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste)
//! - Editing: backspace, delete, cursor movement
//! - Emit `DraftChanged` after every edit and `Submit` on Enter
//! - Scroll horizontally so the cursor stays visible
//! - Show a placeholder while empty
//!
//! ## State Management
//!
//! The draft itself belongs to the core `Chat`. The box keeps a mirror
//! buffer for editing and reports every change upward; after each update
//! the parent calls [`InputBox::sync`] so a cleared draft clears the box.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Offset from area edge to content (border width)
const BORDER_OFFSET: u16 = 1;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The buffer was edited; carries the full new text
    DraftChanged(String),
    /// Enter pressed. Whether anything is sent is the core's decision.
    Submit,
}

pub struct InputBox {
    /// Mirror of the core draft
    pub buffer: String,
    /// Shown dimmed while the buffer is empty (Prop)
    pub placeholder: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// First visible display column
    scroll_col: usize,
}

impl InputBox {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            placeholder: placeholder.into(),
            cursor: 0,
            scroll_col: 0,
        }
    }

    /// Adopt `draft` if it differs from the buffer (e.g. cleared by submit).
    pub fn sync(&mut self, draft: &str) {
        if self.buffer != draft {
            self.buffer = draft.to_string();
            self.cursor = self.buffer.len();
            self.scroll_col = 0;
        }
    }

    fn changed(&self) -> Option<InputEvent> {
        Some(InputEvent::DraftChanged(self.buffer.clone()))
    }

    /// Display column of the cursor.
    fn cursor_col(&self) -> usize {
        self.buffer[..self.cursor].chars().map(display_width).sum()
    }

    /// Keep the cursor inside a window `width` columns wide.
    fn update_scroll(&mut self, width: usize) {
        let col = self.cursor_col();
        if col < self.scroll_col {
            self.scroll_col = col;
        } else if width > 0 && col >= self.scroll_col + width {
            self.scroll_col = self.char_start_at_or_after(col + 1 - width);
        }
    }

    /// First character boundary at or after display column `col`, so a
    /// wide character is never cut in half at the left edge.
    fn char_start_at_or_after(&self, col: usize) -> usize {
        let mut start = 0;
        for c in self.buffer.chars() {
            if start >= col {
                break;
            }
            start += display_width(c);
        }
        start
    }

    /// The slice of the buffer visible from `scroll_col`, at most `width` columns.
    fn visible_text(&self, width: usize) -> String {
        let mut skipped = 0;
        let mut used = 0;
        let mut out = String::new();
        for c in self.buffer.chars() {
            let w = display_width(c);
            if skipped < self.scroll_col {
                skipped += w;
                continue;
            }
            if used + w > width {
                break;
            }
            used += w;
            out.push(if c == '\n' { '↵' } else { c });
        }
        out
    }
}

/// Newlines (from paste) are drawn as a single `↵` column.
fn display_width(c: char) -> usize {
    if c == '\n' { 1 } else { c.width().unwrap_or(0) }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(BORDER_OFFSET * 2) as usize;
        self.update_scroll(width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Message");

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.as_str()).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.visible_text(width)).style(Style::default().fg(Color::Cyan))
        };
        frame.render_widget(paragraph.block(block), area);

        let cursor_x = area.x + BORDER_OFFSET + (self.cursor_col() - self.scroll_col) as u16;
        frame.set_cursor_position((cursor_x, area.y + BORDER_OFFSET));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
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
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_typing_reports_full_draft() {
        let mut input = InputBox::new("");
        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::DraftChanged("a".into())));
        let res = input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(res, Some(InputEvent::DraftChanged("ab".into())));
        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::DraftChanged("a".into())));
    }

    #[test]
    fn test_edit_in_middle_with_multibyte() {
        let mut input = InputBox::new("");
        type_str(&mut input, "héllo");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::CursorRight);
        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::DraftChanged("hllo".into())));
        let res = input.handle_event(&TuiEvent::Delete);
        assert_eq!(res, Some(InputEvent::DraftChanged("hlo".into())));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = InputBox::new("");
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(input.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn test_paste_keeps_newlines() {
        let mut input = InputBox::new("");
        let res = input.handle_event(&TuiEvent::Paste("line one\nline two".into()));
        assert_eq!(
            res,
            Some(InputEvent::DraftChanged("line one\nline two".into()))
        );
    }

    #[test]
    fn test_submit_defers_to_core() {
        let mut input = InputBox::new("");
        type_str(&mut input, "   ");
        // Emitted even for blank text; the core decides it's a no-op
        assert_eq!(input.handle_event(&TuiEvent::Submit), Some(InputEvent::Submit));
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn test_sync_clears_after_submit() {
        let mut input = InputBox::new("");
        type_str(&mut input, "hello");
        input.sync("");
        assert!(input.buffer.is_empty());
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        let mut input = InputBox::new("Type your message...");
        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
            })
            .unwrap();
        assert!(rendered_text(&terminal).contains("Type your message..."));
    }

    #[test]
    fn test_render_scrolls_to_cursor() {
        let mut terminal = Terminal::new(TestBackend::new(12, 3)).unwrap();
        let mut input = InputBox::new("");
        type_str(&mut input, "abcdefghijklmnop");
        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
            })
            .unwrap();

        let text = rendered_text(&terminal);
        // 10 visible columns; the last one is reserved for the cursor
        assert!(text.contains("hijklmnop"));
        assert!(!text.contains("abc"));
    }

    #[test]
    fn test_scroll_never_splits_wide_chars() {
        use unicode_width::UnicodeWidthStr;

        let mut input = InputBox::new("");
        // 11 columns: 'a' then five double-width chars
        type_str(&mut input, "a漢漢漢漢漢");
        input.update_scroll(10);

        // Column 2 is the second half of the first 漢; start after it
        assert_eq!(input.scroll_col, 3);
        let shown = input.visible_text(10);
        assert_eq!(shown, "漢漢漢漢");
        // The cursor lands right after the drawn text
        assert_eq!(input.cursor_col() - input.scroll_col, shown.width());
    }
}
