//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: endpoint, pending count, "↓ New" indicator
//! - `MessageBubble`: one transcript entry
//! - `SendButton`: the clickable submit control
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: draft editing, emits `DraftChanged` / `Submit`
//! - `MessageList`: scrollable transcript with layout caching and follow-bottom
//!
//! Components receive external data as props (struct fields), never by
//! reaching into global state, so each can be rendered alone in tests.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── input_box.rs
//! └── send_button.rs
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod send_button;
mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use message::MessageBubble;
pub use message_list::{MessageList, MessageListState};
pub use send_button::SendButton;
pub use title_bar::TitleBar;
