//! Sequence counter for requests that may overlap.
//!
//! Store actions are not queued or cancelled, so two calls of the same action
//! can be in flight at once and finish in any order. Each call takes a
//! [`Ticket`] when it starts and asks [`RequestTracker::is_latest`] when it
//! resumes; only the newest ticket may publish shared state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number handed out when a request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Monotonic ticket dispenser.
#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True when no ticket was issued after `ticket`.
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Number of tickets issued so far.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_newest_ticket_is_latest() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_latest(first));

        let second = tracker.begin();
        assert!(!tracker.is_latest(first));
        assert!(tracker.is_latest(second));
        assert!(second > first);
        assert_eq!(tracker.issued(), 2);
    }
}
