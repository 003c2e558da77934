use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::Chat;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, SendButton, TitleBar, send_button};

/// Screen regions, top to bottom: title, transcript, then input + button.
pub struct ScreenLayout {
    pub title: Rect,
    pub messages: Rect,
    pub input: Rect,
    pub send_button: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    use Constraint::{Length, Min};
    let [title, messages, bottom] = Layout::vertical([Length(1), Min(0), Length(3)]).areas(area);
    let [input, send_button] =
        Layout::horizontal([Min(0), Length(send_button::WIDTH)]).areas(bottom);
    ScreenLayout {
        title,
        messages,
        input,
        send_button,
    }
}

pub fn draw_ui(frame: &mut Frame, chat: &Chat, tui: &mut TuiState) {
    let layout = screen_layout(frame.area());
    tui.send_button_area = layout.send_button;

    MessageList::new(&mut tui.message_list, &chat.transcript, &tui.bot_label)
        .render(frame, layout.messages);

    // Title is drawn after the list so "↓ New" reflects this frame's scroll
    TitleBar::new(
        tui.endpoint.clone(),
        chat.pending_count(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, layout.title);

    tui.input_box.render(frame, layout.input);

    SendButton {
        enabled: !chat.draft.trim().is_empty(),
    }
    .render(frame, layout.send_button);
}
