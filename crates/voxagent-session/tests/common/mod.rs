//! In-memory backend shared by the session tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Map;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use voxagent_client::{AgentBackend, ClientError};
use voxagent_session::AgentSession;
use voxagent_types::{Agent, AgentDraft, Catalog, DraftField, VoiceAsset, VoiceSample};

/// Backend whose collections live in memory and whose failures are
/// scripted per test.
#[derive(Default)]
pub struct FakeBackend {
    pub agents: Mutex<Vec<Agent>>,
    pub voices: Mutex<Vec<VoiceAsset>>,
    pub created: Mutex<Vec<AgentDraft>>,
    pub uploads: Mutex<Vec<(String, String)>>,
    pub create_failure: Mutex<Option<(u16, String)>>,
    pub clone_failure: Mutex<Option<(u16, String)>>,
    pub list_failure: AtomicBool,
    pub agent_fetches: AtomicUsize,
    pub voice_fetches: AtomicUsize,
    /// When set, `create_agent` waits for this before answering.
    pub create_gate: Mutex<Option<oneshot::Receiver<()>>>,
    /// When non-empty, each `list_agents` call waits on the next queued
    /// receiver and returns what it yields.
    pub scripted_agent_lists: Mutex<VecDeque<oneshot::Receiver<Vec<Agent>>>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_agents(agents: Vec<Agent>) -> Arc<Self> {
        let backend = Self::default();
        *backend.agents.lock().unwrap() = agents;
        Arc::new(backend)
    }

    pub fn fail_create(&self, status: u16, detail: &str) {
        *self.create_failure.lock().unwrap() = Some((status, detail.to_string()));
    }

    pub fn fail_clone(&self, status: u16, detail: &str) {
        *self.clone_failure.lock().unwrap() = Some((status, detail.to_string()));
    }

    pub fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

pub fn agent(id: &str, name: &str) -> Agent {
    Agent {
        id: id.to_string(),
        name: name.to_string(),
        role: "Agent".to_string(),
        language: "hi-IN".to_string(),
        llm_model: "groq-mixtral".to_string(),
        extra: Map::new(),
    }
}

pub fn voice(id: &str) -> VoiceAsset {
    VoiceAsset {
        id: id.to_string(),
        name: id.to_string(),
        provider: None,
        language: None,
        extra: Map::new(),
    }
}

fn server_error(failure: &(u16, String)) -> ClientError {
    ClientError::Server {
        status: failure.0,
        detail: failure.1.clone(),
    }
}

#[async_trait]
impl AgentBackend for FakeBackend {
    async fn list_agents(&self) -> Result<Vec<Agent>, ClientError> {
        self.agent_fetches.fetch_add(1, Ordering::SeqCst);
        if self.list_failure.load(Ordering::SeqCst) {
            return Err(ClientError::Server {
                status: 503,
                detail: "backend unavailable".to_string(),
            });
        }
        let scripted = self.scripted_agent_lists.lock().unwrap().pop_front();
        if let Some(rx) = scripted {
            return rx
                .await
                .map_err(|_| ClientError::Decode("script dropped".to_string()));
        }
        Ok(self.agents.lock().unwrap().clone())
    }

    async fn create_agent(&self, draft: &AgentDraft) -> Result<Agent, ClientError> {
        self.created.lock().unwrap().push(draft.clone());
        let gate = self.create_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(failure) = self.create_failure.lock().unwrap().as_ref() {
            return Err(server_error(failure));
        }
        let mut agents = self.agents.lock().unwrap();
        let mut created = agent(&format!("agent-{}", agents.len() + 1), &draft.name);
        created.role = draft.role.clone();
        created.language = draft.language.clone();
        created.llm_model = draft.llm_model.clone();
        agents.push(created.clone());
        Ok(created)
    }

    async fn list_voices(&self) -> Result<Vec<VoiceAsset>, ClientError> {
        self.voice_fetches.fetch_add(1, Ordering::SeqCst);
        if self.list_failure.load(Ordering::SeqCst) {
            return Err(ClientError::Server {
                status: 503,
                detail: "backend unavailable".to_string(),
            });
        }
        Ok(self.voices.lock().unwrap().clone())
    }

    async fn clone_voice(
        &self,
        sample: &VoiceSample,
        voice_name: &str,
    ) -> Result<VoiceAsset, ClientError> {
        self.uploads
            .lock()
            .unwrap()
            .push((sample.file_name.clone(), voice_name.to_string()));
        if let Some(failure) = self.clone_failure.lock().unwrap().as_ref() {
            return Err(server_error(failure));
        }
        let created = voice(voice_name);
        self.voices.lock().unwrap().push(created.clone());
        Ok(created)
    }
}

pub fn session(backend: &Arc<FakeBackend>) -> AgentSession<Arc<FakeBackend>> {
    AgentSession::new(Arc::clone(backend), Arc::new(Catalog::builtin()))
}

/// Fills the draft with the example agent used across tests.
pub fn fill_example_draft<B: AgentBackend>(session: &AgentSession<B>) {
    session.update_field(DraftField::Name, "Bot");
    session.update_field(DraftField::Role, "Agent");
    session.update_field(DraftField::SystemInstruction, "Be helpful");
    session.update_field(DraftField::Language, "hi-IN");
    session.update_field(DraftField::LlmModel, "groq-mixtral");
    session.update_field(DraftField::TtsModel, "google-tts");
    session.update_field(DraftField::SttModel, "google-stt");
}

/// Yields until `condition` holds.
pub async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
