use tokio::sync::watch;

use crate::inflight::{RequestTracker, Ticket};

/// State that carries a loading flag.
pub(crate) trait Loading {
    fn set_loading(&mut self, loading: bool);
}

/// Observable store state plus the trackers that decide who may write it.
///
/// `ops` covers every action and drives the loading flag; `reads` covers the
/// actions whose response replaces state (fetches and the person update).
pub(crate) struct StateCell<S> {
    tx: watch::Sender<S>,
    ops: RequestTracker,
    reads: RequestTracker,
}

impl<S: Loading + Clone> StateCell<S> {
    pub(crate) fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            ops: RequestTracker::new(),
            reads: RequestTracker::new(),
        }
    }

    pub(crate) fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Start an action: raise the loading flag and take an op ticket.
    pub(crate) fn begin(&self) -> Ticket {
        let ticket = self.ops.begin();
        self.tx.send_modify(|s| s.set_loading(true));
        ticket
    }

    /// Take a ticket for a response that will replace state.
    pub(crate) fn begin_read(&self) -> Ticket {
        self.reads.begin()
    }

    /// Apply `f` unconditionally.
    pub(crate) fn modify(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }

    /// Apply `f` if no newer read was started since `read`.
    pub(crate) fn publish(&self, read: Ticket, f: impl FnOnce(&mut S)) -> bool {
        if !self.reads.is_latest(read) {
            tracing::debug!(seq = read.seq(), "dropping superseded response");
            return false;
        }
        self.tx.send_modify(f);
        true
    }

    /// End an action. Only the newest action lowers the loading flag.
    pub(crate) fn finish(&self, ticket: Ticket) {
        if self.ops.is_latest(ticket) {
            self.tx.send_modify(|s| s.set_loading(false));
        }
    }
}
