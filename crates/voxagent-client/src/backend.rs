use async_trait::async_trait;
use std::sync::Arc;
use voxagent_types::{Agent, AgentDraft, VoiceAsset, VoiceSample};

use crate::error::ClientError;

/// The remote agent registry and voice library a session synchronises with.
///
/// Collections are always returned whole and in backend order; callers
/// replace their caches with the result rather than merging.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Fetches every agent.
    async fn list_agents(&self) -> Result<Vec<Agent>, ClientError>;

    /// Creates an agent from `draft`. The payload includes a `voiceId`
    /// alias of `ttsVoice`.
    async fn create_agent(&self, draft: &AgentDraft) -> Result<Agent, ClientError>;

    /// Fetches every cloned voice.
    async fn list_voices(&self) -> Result<Vec<VoiceAsset>, ClientError>;

    /// Uploads `sample` to be cloned under `voice_name`.
    async fn clone_voice(
        &self,
        sample: &VoiceSample,
        voice_name: &str,
    ) -> Result<VoiceAsset, ClientError>;
}

#[async_trait]
impl<B: AgentBackend + ?Sized> AgentBackend for Arc<B> {
    async fn list_agents(&self) -> Result<Vec<Agent>, ClientError> {
        (**self).list_agents().await
    }

    async fn create_agent(&self, draft: &AgentDraft) -> Result<Agent, ClientError> {
        (**self).create_agent(draft).await
    }

    async fn list_voices(&self) -> Result<Vec<VoiceAsset>, ClientError> {
        (**self).list_voices().await
    }

    async fn clone_voice(
        &self,
        sample: &VoiceSample,
        voice_name: &str,
    ) -> Result<VoiceAsset, ClientError> {
        (**self).clone_voice(sample, voice_name).await
    }
}
