use core_types::ListenerToken;
use std::collections::VecDeque;

/// Measurements waiting for the next scheduler tick.
///
/// Entries are never cancelled or coalesced: a control that changes twice
/// before the tick is measured twice, each time with its latest value.
#[derive(Clone, Debug, Default)]
pub struct TickQueue {
    pending: VecDeque<ListenerToken>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: ListenerToken) {
        self.pending.push_back(token);
    }

    /// Everything queued so far, in arrival order. Entries pushed while the
    /// batch runs wait for the following tick.
    pub fn take_batch(&mut self) -> Vec<ListenerToken> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of queued entries for `token`.
    pub fn pending_for(&self, token: ListenerToken) -> usize {
        self.pending.iter().filter(|t| **t == token).count()
    }

    /// Forget every entry for `token` (used when its binding goes away).
    pub fn forget(&mut self, token: ListenerToken) {
        self.pending.retain(|t| *t != token);
    }
}
