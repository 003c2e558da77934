//! # Core Application Logic
//!
//! The transcript controller. It knows nothing about terminals or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Chat (state)         │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect::SendPrompt
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐            ┌────────────┐
//!             │    TUI     │            │ Dispatcher │
//!             │  (ratatui) │            │  (tokio)   │
//!             └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message`, `Sender` and the append-only `Transcript`
//! - [`state`]: The `Chat` struct and submission tickets
//! - [`action`]: The `Action` enum and `update()`
//! - [`config`]: File/env/CLI configuration

pub mod action;
pub mod config;
pub mod message;
pub mod state;
