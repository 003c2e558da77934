//! The boundary to the question-answering service.
//!
//! The core never sees this module: it only emits `Effect::SendPrompt` and
//! later receives a string (or an error message) back.

pub mod http;
pub mod service;

pub use http::HttpAnswerService;
pub use service::{AnswerError, AnswerService};
