use voxagent_types::{Agent, AgentDraft, VoiceAsset};

/// Whether a notice reports a success or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A one-shot message shown to the user until it expires or is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Monotonic per session. A scheduled clear only removes the notice
    /// carrying its own id.
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

/// Observable submission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Submitting,
}

/// Everything a front end needs to render a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub draft: AgentDraft,
    pub agents: Vec<Agent>,
    pub voices: Vec<VoiceAsset>,
    pub loading: bool,
    pub notice: Option<Notice>,
}

impl SessionSnapshot {
    pub(crate) fn new(draft: AgentDraft) -> Self {
        Self {
            draft,
            agents: Vec::new(),
            voices: Vec::new(),
            loading: false,
            notice: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Submitting
        } else {
            SessionPhase::Idle
        }
    }

    /// The current notice text, or `""` when nothing is shown.
    pub fn message(&self) -> &str {
        self.notice.as_ref().map(|n| n.text.as_str()).unwrap_or("")
    }
}
