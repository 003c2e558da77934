//! ragchat library exports for testing

pub mod answer;
pub mod core;
pub mod dispatch;
pub mod tui;

#[cfg(test)]
pub mod test_support;
