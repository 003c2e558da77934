//! # Chat State
//!
//! Core conversational state for ragchat. Domain logic only, no TUI types.
//! Presentation state (scroll position, cursor) lives in the `tui` module.
//!
//! ```text
//! Chat
//! ├── instance: u64                 // unique per controller, stamped on tickets
//! ├── transcript: Transcript        // append-only message log
//! ├── draft: String                 // uncommitted input
//! ├── next_seq: u64                 // ticket counter
//! └── pending: BTreeSet<u64>        // seqs of requests in flight
//! ```
//!
//! State changes only happen through `update(chat, action)` in action.rs.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::message::Transcript;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Identifies one submission. A continuation carrying a ticket is only
/// applied by the controller that minted it, and only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub instance: u64,
    pub seq: u64,
}

pub struct Chat {
    instance: u64,
    pub transcript: Transcript,
    pub draft: String,
    next_seq: u64,
    pending: BTreeSet<u64>,
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

impl Chat {
    pub fn new() -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            transcript: Transcript::new(),
            draft: String::new(),
            next_seq: 0,
            pending: BTreeSet::new(),
        }
    }

    #[cfg(test)]
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Number of submissions still waiting on the service.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, ticket: Ticket) -> bool {
        ticket.instance == self.instance && self.pending.contains(&ticket.seq)
    }

    pub(crate) fn issue_ticket(&mut self) -> Ticket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(seq);
        Ticket {
            instance: self.instance,
            seq,
        }
    }

    /// Marks the ticket settled. Returns false if it was not ours or not pending.
    pub(crate) fn settle(&mut self, ticket: Ticket) -> bool {
        self.is_pending(ticket) && self.pending.remove(&ticket.seq)
    }
}
