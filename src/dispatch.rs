//! # Dispatcher
//!
//! Executes the effects returned by `core::action::update`.
//!
//! `Effect::SendPrompt` becomes a tokio task that awaits the answer service
//! and posts the outcome back to the event loop as an `Action`. The loop
//! owns the `Chat`, so continuations are always applied on the UI thread.
//!
//! There is no cancellation and no timeout. If the loop has gone away by the
//! time a task finishes, the send fails and the outcome is dropped.

use std::sync::Arc;
use std::sync::mpsc;

use log::{info, warn};
use tokio::task::JoinHandle;

use crate::answer::AnswerService;
use crate::core::action::{Action, Effect};
use crate::core::state::Ticket;

pub struct Dispatcher {
    service: Arc<dyn AnswerService>,
    tx: mpsc::Sender<Action>,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn AnswerService>, tx: mpsc::Sender<Action>) -> Self {
        Self { service, tx }
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    /// Runs `effect`. Returns the task handle when a request was spawned.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, effect: Effect) -> Option<JoinHandle<()>> {
        match effect {
            Effect::SendPrompt { ticket, prompt } => Some(self.spawn_request(ticket, prompt)),
            Effect::None | Effect::Quit => None,
        }
    }

    fn spawn_request(&self, ticket: Ticket, prompt: String) -> JoinHandle<()> {
        info!(
            "Spawning request via {} (seq={})",
            self.service.name(),
            ticket.seq
        );
        let service = self.service.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let action = match service.send_prompt(&prompt).await {
                Ok(text) => Action::AnswerReceived { ticket, text },
                Err(e) => Action::AnswerFailed {
                    ticket,
                    error: e.to_string(),
                },
            };
            if tx.send(action).is_err() {
                warn!(
                    "Dropping outcome for seq={}: receiver dropped",
                    ticket.seq
                );
            }
        })
    }
}
