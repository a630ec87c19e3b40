use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use voxagent_client::{AgentBackend, ClientError};
use voxagent_types::{
    clone_voice_name, Agent, Catalog, DraftError, DraftField, VoiceAsset, VoiceSample,
};

use crate::notice::NoticeBoard;
use crate::sequence::Sequencer;
use crate::snapshot::{Notice, NoticeKind, SessionSnapshot};

/// How long a notice stays visible by default.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_millis(3000);

pub const AGENT_CREATED_MESSAGE: &str = "Agent created successfully!";
pub const AGENT_ERROR_PREFIX: &str = "Error creating agent: ";
pub const VOICE_CLONED_MESSAGE: &str = "Voice cloned successfully!";
pub const VOICE_ERROR_PREFIX: &str = "Error cloning voice: ";

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Time a notice stays visible before clearing itself.
    pub notice_ttl: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }
}

/// Result of [`AgentSession::submit_agent`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The backend created the agent; the draft was reset.
    Created(Agent),
    /// The draft failed validation; nothing was sent.
    Rejected(DraftError),
    /// The backend call failed; the draft was kept.
    Failed(ClientError),
    /// Another submission was in flight; nothing happened.
    Busy,
}

/// Result of [`AgentSession::upload_voice_sample`].
#[derive(Debug)]
pub enum UploadOutcome {
    Cloned(VoiceAsset),
    Failed(ClientError),
    Busy,
    /// No file was selected; nothing happened.
    NoFile,
}

/// Result of a collection refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The cache was replaced with this many records.
    Applied(usize),
    /// A newer refresh had already landed; this response was dropped.
    Superseded,
}

/// A single user's agent configuration session.
///
/// All state is private to the session. Methods take `&self`, so a
/// session can be shared behind an `Arc` between a UI loop and background
/// tasks; the `loading` flag is what serialises submissions.
pub struct AgentSession<B> {
    backend: B,
    catalog: Arc<Catalog>,
    state: Arc<watch::Sender<SessionSnapshot>>,
    notices: NoticeBoard,
    agent_refreshes: Sequencer,
    voice_refreshes: Sequencer,
}

impl<B> std::fmt::Debug for AgentSession<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSession")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Holds the single-flight slot; releases it on drop, including when the
/// owning future is cancelled mid-request.
struct InFlight<'a> {
    state: &'a watch::Sender<SessionSnapshot>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}

impl<B: AgentBackend> AgentSession<B> {
    pub fn new(backend: B, catalog: Arc<Catalog>) -> Self {
        Self::with_settings(backend, catalog, SessionSettings::default())
    }

    pub fn with_settings(backend: B, catalog: Arc<Catalog>, settings: SessionSettings) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::new(catalog.default_draft()));
        Self {
            backend,
            catalog,
            state: Arc::new(state),
            notices: NoticeBoard::new(settings.notice_ttl),
            agent_refreshes: Sequencer::default(),
            voice_refreshes: Sequencer::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes. The receiver starts at the current
    /// snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Loads both collections concurrently.
    ///
    /// Failures are logged and otherwise ignored: the affected cache stays
    /// as it was and nothing is retried.
    pub async fn initialize(&self) {
        let (agents, voices) = tokio::join!(self.refresh_agents(), self.refresh_voices());
        if let Err(e) = agents {
            warn!(error = %e, "failed to fetch agents");
        }
        if let Err(e) = voices {
            warn!(error = %e, "failed to fetch voice library");
        }
    }

    /// Replaces one draft field. No validation happens here.
    pub fn update_field(&self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|s| s.draft.set(field, value));
    }

    /// Submits the draft to the backend.
    ///
    /// Returns [`SubmitOutcome::Busy`] without side effects if a submission
    /// or upload is already in flight. A draft with a blank required field
    /// or an option outside the catalog is rejected locally with an error
    /// notice. On success the draft is reset to the catalog defaults and the
    /// agent collection re-fetched; on failure the draft is kept.
    pub async fn submit_agent(&self) -> SubmitOutcome {
        if self.state.borrow().loading {
            debug!("agent submission ignored: another request is in flight");
            return SubmitOutcome::Busy;
        }

        let draft = self.state.borrow().draft.clone();
        if let Err(e) = draft.validate(&self.catalog) {
            debug!(error = %e, "agent draft rejected");
            self.notify(NoticeKind::Error, format!("{AGENT_ERROR_PREFIX}{e}"));
            return SubmitOutcome::Rejected(e);
        }

        let Some(_slot) = self.begin() else {
            return SubmitOutcome::Busy;
        };

        match self.backend.create_agent(&draft).await {
            Ok(agent) => {
                info!(agent_id = %agent.id, name = %draft.name, "agent created");
                self.notify(NoticeKind::Success, AGENT_CREATED_MESSAGE);
                let defaults = self.catalog.default_draft();
                self.state.send_modify(|s| s.draft = defaults);
                if let Err(e) = self.refresh_agents().await {
                    warn!(error = %e, "failed to refresh agents after create");
                }
                SubmitOutcome::Created(agent)
            }
            Err(e) => {
                warn!(error = %e, name = %draft.name, "agent creation failed");
                self.notify(NoticeKind::Error, format!("{AGENT_ERROR_PREFIX}{e}"));
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Uploads an audio sample for cloning under a generated
    /// `cloned-voice-<millis>` name.
    ///
    /// `None` (no file selected) is a no-op. Shares the single-flight slot
    /// with [`submit_agent`](Self::submit_agent).
    pub async fn upload_voice_sample(&self, sample: Option<VoiceSample>) -> UploadOutcome {
        let Some(sample) = sample else {
            return UploadOutcome::NoFile;
        };

        let Some(_slot) = self.begin() else {
            debug!("voice upload ignored: another request is in flight");
            return UploadOutcome::Busy;
        };

        let voice_name = clone_voice_name(Utc::now());
        match self.backend.clone_voice(&sample, &voice_name).await {
            Ok(voice) => {
                info!(voice_id = %voice.id, %voice_name, "voice cloned");
                self.notify(NoticeKind::Success, VOICE_CLONED_MESSAGE);
                if let Err(e) = self.refresh_voices().await {
                    warn!(error = %e, "failed to refresh voice library after clone");
                }
                UploadOutcome::Cloned(voice)
            }
            Err(e) => {
                warn!(error = %e, file = %sample.file_name, "voice cloning failed");
                self.notify(NoticeKind::Error, format!("{VOICE_ERROR_PREFIX}{e}"));
                UploadOutcome::Failed(e)
            }
        }
    }

    /// Re-fetches the agent collection and replaces the cache.
    pub async fn refresh_agents(&self) -> Result<Refresh, ClientError> {
        self.refresh(&self.agent_refreshes, self.backend.list_agents(), |s, agents| {
            s.agents = agents
        })
        .await
    }

    /// Re-fetches the voice collection and replaces the cache.
    pub async fn refresh_voices(&self) -> Result<Refresh, ClientError> {
        self.refresh(&self.voice_refreshes, self.backend.list_voices(), |s, voices| {
            s.voices = voices
        })
        .await
    }

    /// Shows a notice that clears itself after the configured ttl,
    /// replacing any notice currently shown.
    ///
    /// Called outside a tokio runtime, the notice is shown without the
    /// auto-clear and stays until replaced or dismissed.
    pub fn notify(&self, kind: NoticeKind, text: impl Into<String>) -> Notice {
        self.notices.post(&self.state, kind, text)
    }

    /// Clears the current notice now.
    pub fn dismiss_notice(&self) {
        self.notices.dismiss(&self.state);
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        let acquired = self.state.send_if_modified(|s| {
            if s.loading {
                false
            } else {
                s.loading = true;
                true
            }
        });
        acquired.then_some(InFlight { state: &self.state })
    }

    async fn refresh<T, F>(
        &self,
        sequencer: &Sequencer,
        fetch: F,
        apply: impl FnOnce(&mut SessionSnapshot, Vec<T>),
    ) -> Result<Refresh, ClientError>
    where
        F: Future<Output = Result<Vec<T>, ClientError>>,
    {
        let ticket = sequencer.issue();
        let items = fetch.await?;
        let count = items.len();
        let applied = sequencer.apply_if_latest(ticket, || {
            self.state.send_modify(|s| apply(s, items));
        });

        if applied {
            Ok(Refresh::Applied(count))
        } else {
            debug!(ticket, "dropping superseded collection response");
            Ok(Refresh::Superseded)
        }
    }
}
