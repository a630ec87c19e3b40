//! The agent configuration session.
//!
//! An [`AgentSession`] owns the [`AgentDraft`](voxagent_types::AgentDraft)
//! a user is editing, the cached agent and voice collections, and the small
//! amount of UI state around them: a `loading` flag and a transient notice.
//! Every change is published as a [`SessionSnapshot`] on a
//! `tokio::sync::watch` channel, so front ends re-render by subscribing
//! rather than polling.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──submit/upload──▶ Submitting ──success──▶ Idle (notice, refetch)
//!                                    └─failure──▶ Idle (error notice)
//! ```
//!
//! Submitting is entered only from Idle. A submit or upload issued while
//! another is in flight returns `Busy` without touching the backend.
//!
//! Collections are fetch-and-replace: after a mutation the whole
//! collection is re-read and the cache swapped. Out-of-order responses are
//! resolved last-issued-wins.
//!
//! Notices clear themselves after [`SessionSettings::notice_ttl`]. Posting
//! a new notice cancels the previous clear, so an old timer never wipes a
//! newer message.

mod notice;
mod sequence;
mod session;
mod snapshot;

pub use session::{
    AgentSession, Refresh, SessionSettings, SubmitOutcome, UploadOutcome, AGENT_CREATED_MESSAGE,
    AGENT_ERROR_PREFIX, DEFAULT_NOTICE_TTL, VOICE_CLONED_MESSAGE, VOICE_ERROR_PREFIX,
};
pub use snapshot::{Notice, NoticeKind, SessionPhase, SessionSnapshot};
