use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use tokio::sync::watch;

/// Observable state of one flow plus the ticket of its newest run.
///
/// The ticket is only read or bumped inside the watch channel's write
/// closure, so a check-then-publish cannot interleave with a new run.
pub(crate) struct FlowCell<S> {
    generation: AtomicU64,
    state: watch::Sender<S>,
}

impl<S: Clone> FlowCell<S> {
    pub(crate) fn new(initial: S) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Start a run that supersedes any run in flight.
    pub(crate) fn begin(&self, state: S) -> u64 {
        let mut ticket = 0;
        self.state.send_modify(|current| {
            ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *current = state;
        });
        ticket
    }

    /// Publish `state` if `ticket` is still the newest run.
    pub(crate) fn publish(&self, ticket: u64, state: S) -> bool {
        let published = self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) == ticket {
                *current = state;
                true
            } else {
                false
            }
        });

        if !published {
            debug!("Discarding result of superseded run #{ticket}");
        }
        published
    }

    /// Publish a rejected trigger unless `busy` holds for the current state.
    ///
    /// Takes no ticket, so a run in flight keeps its right to publish.
    pub(crate) fn reject<F>(&self, state: S, busy: F) -> bool
    where
        F: FnOnce(&S) -> bool,
    {
        let published = self.state.send_if_modified(|current| {
            if busy(current) {
                false
            } else {
                *current = state;
                true
            }
        });

        if !published {
            debug!("Rejected trigger left the run in flight untouched");
        }
        published
    }

    /// Mutate the current state in place without starting a run.
    pub(crate) fn modify<F>(&self, change: F) -> bool
    where
        F: FnOnce(&mut S) -> bool,
    {
        self.state.send_if_modified(change)
    }

    pub(crate) fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }
}
