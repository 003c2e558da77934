//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (smooth scroll toward a new message): draws every ~16ms.
//! - **Idle**: sleeps up to 250ms, only redraws on events, on answers
//!   arriving from background tasks, or on terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::answer::HttpAnswerService;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::Chat;
use crate::dispatch::Dispatcher;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState, SendButton};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_FRAME: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Where the send button was drawn last frame (for click hit-testing)
    pub send_button_area: Rect,
    pub endpoint: String,
    pub bot_label: String,
}

impl TuiState {
    pub fn new(endpoint: &str, placeholder: &str, bot_label: &str) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(placeholder),
            send_button_area: Rect::default(),
            endpoint: endpoint.to_string(),
            bot_label: bot_label.to_string(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Routes one terminal event. Returns the effect the caller must execute.
///
/// Enter in the input box and a click on the send button both reduce to
/// the same `Action::Submit`.
fn handle_event(chat: &mut Chat, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let action = match event {
        TuiEvent::Resize => return Effect::None,
        TuiEvent::Quit | TuiEvent::ForceQuit => Action::Quit,
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            return Effect::None;
        }
        TuiEvent::MouseClick(column, row) => {
            if !SendButton::hit(tui.send_button_area, column, row) {
                return Effect::None;
            }
            Action::Submit
        }
        other => match tui.input_box.handle_event(&other) {
            Some(InputEvent::DraftChanged(text)) => Action::UpdateDraft(text),
            Some(InputEvent::Submit) => Action::Submit,
            None => return Effect::None,
        },
    };

    debug!("Dispatching {:?}", action);
    let effect = update(chat, action);
    tui.input_box.sync(&chat.draft);
    effect
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let service = HttpAnswerService::new(&config.endpoint).map_err(std::io::Error::other)?;
    let (tx, rx) = mpsc::channel();
    let dispatcher = Dispatcher::new(Arc::new(service), tx);
    info!(
        "Answer service: {} at {}",
        dispatcher.service_name(),
        config.endpoint
    );

    let mut chat = Chat::new();
    let mut tui = TuiState::new(&config.endpoint, &config.placeholder, &config.bot_label);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true;

    'event_loop: loop {
        let animating = tui.message_list.is_animating();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &chat, &mut tui)) {
                ratatui::restore();
                return Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_FRAME } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match handle_event(&mut chat, &mut tui, event) {
                Effect::Quit => break 'event_loop,
                effect => {
                    dispatcher.dispatch(effect);
                }
            }
        }

        // Continuations from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut chat, action) == Effect::Quit {
                break 'event_loop;
            }
        }
    }

    if chat.pending_count() > 0 {
        warn!(
            "Exiting with {} request(s) still pending; their answers will be dropped",
            chat.pending_count()
        );
    }

    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;

    fn tui_state() -> TuiState {
        let mut tui = TuiState::new("http://rag", "Type your message...", "bot");
        tui.send_button_area = Rect::new(70, 21, 8, 3);
        tui
    }

    fn type_str(chat: &mut Chat, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            assert_eq!(handle_event(chat, tui, TuiEvent::InputChar(c)), Effect::None);
        }
    }

    #[test]
    fn test_typing_updates_draft_only() {
        let mut chat = Chat::new();
        let mut tui = tui_state();
        type_str(&mut chat, &mut tui, "Hi");
        assert_eq!(chat.draft, "Hi");
        assert!(chat.transcript.is_empty());
    }

    #[test]
    fn test_enter_and_click_submit_identically() {
        let mut by_key = Chat::new();
        let mut key_tui = tui_state();
        type_str(&mut by_key, &mut key_tui, "Hello");
        let key_effect = handle_event(&mut by_key, &mut key_tui, TuiEvent::Submit);

        let mut by_click = Chat::new();
        let mut click_tui = tui_state();
        type_str(&mut by_click, &mut click_tui, "Hello");
        let click_effect = handle_event(&mut by_click, &mut click_tui, TuiEvent::MouseClick(72, 22));

        for (chat, tui, effect) in [
            (&by_key, &key_tui, key_effect),
            (&by_click, &click_tui, click_effect),
        ] {
            assert!(matches!(effect, Effect::SendPrompt { ref prompt, .. } if prompt == "Hello"));
            assert_eq!(chat.transcript.messages(), &[Message::user("Hello")]);
            assert_eq!(chat.draft, "");
            assert!(tui.input_box.buffer.is_empty());
        }
    }

    #[test]
    fn test_click_outside_button_does_nothing() {
        let mut chat = Chat::new();
        let mut tui = tui_state();
        type_str(&mut chat, &mut tui, "Hello");
        assert_eq!(handle_event(&mut chat, &mut tui, TuiEvent::MouseClick(5, 5)), Effect::None);
        assert_eq!(chat.draft, "Hello");
    }

    #[test]
    fn test_blank_enter_keeps_input() {
        let mut chat = Chat::new();
        let mut tui = tui_state();
        type_str(&mut chat, &mut tui, "  ");
        assert_eq!(handle_event(&mut chat, &mut tui, TuiEvent::Submit), Effect::None);
        assert_eq!(tui.input_box.buffer, "  ");
        assert!(chat.transcript.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut chat = Chat::new();
        let mut tui = tui_state();
        assert_eq!(handle_event(&mut chat, &mut tui, TuiEvent::Quit), Effect::Quit);
        assert_eq!(handle_event(&mut chat, &mut tui, TuiEvent::ForceQuit), Effect::Quit);
    }

    #[test]
    fn test_scroll_events_do_not_touch_chat() {
        let mut chat = Chat::new();
        let mut tui = tui_state();
        assert_eq!(handle_event(&mut chat, &mut tui, TuiEvent::ScrollUp), Effect::None);
        assert!(!tui.message_list.stick_to_bottom);
        assert_eq!(chat.transcript.revision(), 0);
    }
}
