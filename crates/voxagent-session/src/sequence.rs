use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Orders refreshes of one cached collection.
///
/// Each fetch takes a ticket before it is sent. A response is applied only
/// if no response with a later ticket has been applied already, so a slow
/// stale fetch cannot overwrite a fresher one.
#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl Sequencer {
    pub(crate) fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Runs `apply` if `ticket` is newer than the last applied ticket.
    /// Returns whether it ran.
    pub(crate) fn apply_if_latest(&self, ticket: u64, apply: impl FnOnce()) -> bool {
        let mut applied = self.applied.lock().unwrap_or_else(PoisonError::into_inner);
        if ticket <= *applied {
            return false;
        }
        apply();
        *applied = ticket;
        true
    }
}
