//! # Actions
//!
//! Everything that can happen in ragchat becomes an `Action`.
//! User presses Enter or clicks Send? That's `Action::Submit`.
//! The service answers? That's `Action::AnswerReceived { ticket, text }`.
//!
//! `update()` applies an action to the `Chat` and returns an `Effect`
//! describing the I/O the caller must perform. No side effects here.
//!
//! ```text
//! Chat + Action  →  update()  →  Chat' + Effect
//! ```

use log::{debug, info, warn};

use crate::core::message::Message;
use crate::core::state::{Chat, Ticket};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the draft verbatim (every keystroke).
    UpdateDraft(String),
    /// Commit the draft as a user message and ask the service.
    Submit,
    /// The service resolved the request identified by `ticket`.
    AnswerReceived { ticket: Ticket, text: String },
    /// The service rejected the request identified by `ticket`.
    AnswerFailed { ticket: Ticket, error: String },
    Quit,
}

/// I/O requested by `update()`, executed by the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Call the answer service with `prompt`; report back with `ticket`.
    SendPrompt { ticket: Ticket, prompt: String },
    Quit,
}

pub fn update(chat: &mut Chat, action: Action) -> Effect {
    match action {
        Action::UpdateDraft(text) => {
            chat.draft = text;
            Effect::None
        }
        Action::Submit => {
            if chat.draft.trim().is_empty() {
                debug!("Submit ignored: draft is blank");
                return Effect::None;
            }
            // The user message keeps the raw draft; trimming is only the emptiness check.
            let prompt = std::mem::take(&mut chat.draft);
            chat.transcript.push(Message::user(prompt.clone()));
            let ticket = chat.issue_ticket();
            info!(
                "Submitted prompt (seq={}, len={}, pending={})",
                ticket.seq,
                prompt.len(),
                chat.pending_count()
            );
            Effect::SendPrompt { ticket, prompt }
        }
        Action::AnswerReceived { ticket, text } => {
            if !chat.settle(ticket) {
                warn!("Dropping answer for stale ticket {:?}", ticket);
                return Effect::None;
            }
            info!("Answer received (seq={}, len={})", ticket.seq, text.len());
            chat.transcript.push(Message::bot(text));
            Effect::None
        }
        Action::AnswerFailed { ticket, error } => {
            if !chat.settle(ticket) {
                warn!("Dropping failure for stale ticket {:?}: {}", ticket, error);
                return Effect::None;
            }
            warn!("Request failed (seq={}): {}", ticket.seq, error);
            chat.transcript.push(Message::system(format!("Request failed: {error}")));
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
