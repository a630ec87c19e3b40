//! Transient notices with cancellable auto-clear.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::snapshot::{Notice, NoticeKind, SessionSnapshot};

/// Posts notices into a session's state and schedules their removal.
///
/// At most one clear task is pending at a time: posting aborts the
/// previous one before spawning its own. The clear additionally checks the
/// notice id, so a task that already woke up still cannot remove a newer
/// notice.
#[derive(Debug)]
pub(crate) struct NoticeBoard {
    ttl: Duration,
    next_id: AtomicU64,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl NoticeBoard {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: AtomicU64::new(0),
            pending: Mutex::new(None),
        }
    }

    /// Shows `text` and schedules it to clear after the ttl.
    ///
    /// Outside a tokio runtime the notice is shown but stays until replaced
    /// or dismissed.
    pub(crate) fn post(
        &self,
        state: &Arc<watch::Sender<SessionSnapshot>>,
        kind: NoticeKind,
        text: impl Into<String>,
    ) -> Notice {
        let notice = Notice {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            kind,
            text: text.into(),
        };

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let shown = notice.clone();
        state.send_modify(|s| s.notice = Some(shown));

        let Ok(runtime) = Handle::try_current() else {
            debug!(id = notice.id, "no tokio runtime, notice will not auto-clear");
            return notice;
        };

        let id = notice.id;
        let ttl = self.ttl;
        let state = Arc::clone(state);
        *pending = Some(runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            state.send_if_modified(|s| clear_if_current(s, id));
        }));

        notice
    }

    /// Removes the current notice immediately.
    pub(crate) fn dismiss(&self, state: &watch::Sender<SessionSnapshot>) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        state.send_if_modified(|s| s.notice.take().is_some());
    }
}

impl Drop for NoticeBoard {
    fn drop(&mut self) {
        if let Some(handle) = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

fn clear_if_current(snapshot: &mut SessionSnapshot, id: u64) -> bool {
    if snapshot.notice.as_ref().is_some_and(|n| n.id == id) {
        snapshot.notice = None;
        true
    } else {
        false
    }
}
