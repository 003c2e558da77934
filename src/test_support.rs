//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::answer::{AnswerError, AnswerService};

/// Answers every prompt immediately with `"echo: <prompt>"` and records calls.
#[derive(Default)]
pub struct EchoService {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl AnswerService for EchoService {
    fn name(&self) -> &str {
        "echo"
    }

    async fn send_prompt(&self, prompt: &str) -> Result<String, AnswerError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        Ok(format!("echo: {prompt}"))
    }
}

/// Holds each prompt until the test resolves it through the matching sender.
///
/// Register a prompt with [`ScriptedService::expect`] before it is sent.
#[derive(Default)]
pub struct ScriptedService {
    pending: Mutex<HashMap<String, oneshot::Receiver<Result<String, AnswerError>>>>,
}

impl ScriptedService {
    pub fn expect(&self, prompt: &str) -> oneshot::Sender<Result<String, AnswerError>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().insert(prompt.to_string(), rx);
        tx
    }
}

#[async_trait]
impl AnswerService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn send_prompt(&self, prompt: &str) -> Result<String, AnswerError> {
        let rx = self
            .pending
            .lock()
            .unwrap()
            .remove(prompt)
            .unwrap_or_else(|| panic!("unexpected prompt: {prompt}"));
        rx.await
            .unwrap_or_else(|_| Err(AnswerError::Network("script dropped".into())))
    }
}
