//! Shared types for the Voxagent workspace.
//!
//! This crate provides the data model that every other Voxagent crate
//! speaks: the option [`Catalog`] (languages and LLM/TTS/STT model tables),
//! the client-local [`AgentDraft`] under construction, and the
//! backend-owned [`Agent`] and [`VoiceAsset`] records.
//!
//! No crate in the workspace defines its own copy of these records. The
//! client serialises them onto the wire, the session caches them, and the
//! CLI renders them.

mod agent;
mod catalog;
mod draft;
mod voice;

pub use agent::Agent;
pub use catalog::{
    Catalog, CatalogError, LanguageOption, ModelKind, ModelOption, PricingTier,
    DEFAULT_TTS_VOICE,
};
pub use draft::{AgentDraft, CreateAgentRequest, DraftError, DraftField, ParseDraftFieldError};
pub use voice::{clone_voice_name, VoiceAsset, VoiceSample, CLONED_VOICE_PREFIX};

/// An identifier the backend may send as either a JSON string or a JSON
/// integer.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Text(String),
    Integer(i64),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(s) => s,
            RawId::Integer(n) => n.to_string(),
        }
    }
}
