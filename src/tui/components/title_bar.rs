//! # TitleBar Component
//!
//! Top status line: service endpoint, requests in flight, and a "↓ New"
//! indicator when the user has scrolled away from the newest message.
//!
//! Purely presentational. All fields are props:
//! - `endpoint`: from the resolved config
//! - `pending`: from `Chat::pending_count()`
//! - `has_unseen_content`: from `MessageListState`
//!
//! Formats, most to least decorated:
//!
//! 1. `"ragchat (http://…) | 2 pending | ↓ New"`
//! 2. `"ragchat (http://…) | 1 pending"`
//! 3. `"ragchat (http://…)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    pub endpoint: String,
    pub pending: usize,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(endpoint: String, pending: usize, has_unseen_content: bool) -> Self {
        Self {
            endpoint,
            pending,
            has_unseen_content,
        }
    }

    fn text(&self) -> String {
        let mut title = format!("ragchat ({})", self.endpoint);
        if self.pending > 0 {
            title.push_str(&format!(" | {} pending", self.pending));
        }
        if self.has_unseen_content {
            title.push_str(" | ↓ New");
        }
        title
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
