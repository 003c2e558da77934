//! # SendButton Component
//!
//! The clickable `[ Send ]` control next to the input box. Clicking it is
//! the same user action as pressing Enter: both become `Action::Submit`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

pub const LABEL: &str = "Send";
/// Label plus borders and one column of padding per side.
pub const WIDTH: u16 = LABEL.len() as u16 + 4;

pub struct SendButton {
    /// Dimmed when there is nothing to send (Prop)
    pub enabled: bool,
}

impl SendButton {
    /// Whether a click at (`column`, `row`) lands on a button drawn in `area`.
    pub fn hit(area: Rect, column: u16, row: u16) -> bool {
        area.contains(Position::new(column, row))
    }
}

impl Component for SendButton {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.enabled {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let button = Paragraph::new(LABEL)
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            );
        frame.render_widget(button, area);
    }
}
