//! reqwest implementation of [`AgentBackend`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use voxagent_types::{Agent, AgentDraft, VoiceAsset, VoiceSample};

use crate::backend::AgentBackend;
use crate::config::BackendConfig;
use crate::error::ClientError;
use crate::wire::{error_detail, Listing, Record};

const AGENTS_PATH: &str = "api/agents";
const VOICES_PATH: &str = "api/voices";
const CLONE_VOICE_PATH: &str = "api/voices/clone";
const HEALTH_PATH: &str = "health";
const MAX_REDIRECTS: usize = 5;

/// Result of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

/// Talks to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpBackend {
    /// Builds a client for the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the base URL is not an
    /// absolute http(s) URL, or [`ClientError::Transport`] if the HTTP
    /// client cannot be constructed.
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let base_url = parse_base_url(&config.base_url)?;
        let timeout = config.timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("voxagent/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Fetches the agents configured for one language
    /// (`GET /api/agents?language=<code>`).
    pub async fn list_agents_by_language(&self, code: &str) -> Result<Vec<Agent>, ClientError> {
        let mut url = self.endpoint(AGENTS_PATH)?;
        url.query_pairs_mut().append_pair("language", code);
        let response = self.send(self.http.get(url)).await?;
        Ok(decode::<Listing<Agent>>(response, self.timeout)
            .await?
            .into_vec())
    }

    /// Fetches a single agent (`GET /api/agents/<id>`).
    pub async fn get_agent(&self, id: &str) -> Result<Agent, ClientError> {
        let mut url = self.endpoint(AGENTS_PATH)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .push(id);
        let response = self.send(self.http.get(url)).await?;
        Ok(decode::<Record<Agent>>(response, self.timeout)
            .await?
            .into_inner())
    }

    /// Checks the backend is up (`GET /health`).
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.endpoint(HEALTH_PATH)?;
        let response = self.send(self.http.get(url)).await?;
        decode(response, self.timeout).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| classify(e, self.timeout))?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "backend responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify(e, self.timeout))?;
        Err(ClientError::Server {
            status: status.as_u16(),
            detail: error_detail(status, &body),
        })
    }
}

#[async_trait]
impl AgentBackend for HttpBackend {
    async fn list_agents(&self) -> Result<Vec<Agent>, ClientError> {
        let url = self.endpoint(AGENTS_PATH)?;
        let response = self.send(self.http.get(url)).await?;
        Ok(decode::<Listing<Agent>>(response, self.timeout)
            .await?
            .into_vec())
    }

    async fn create_agent(&self, draft: &AgentDraft) -> Result<Agent, ClientError> {
        let url = self.endpoint(AGENTS_PATH)?;
        let request = self.http.post(url).json(&draft.to_create_request());
        let response = self.send(request).await?;
        let agent = decode::<Record<Agent>>(response, self.timeout)
            .await?
            .into_inner();
        info!(agent_id = %agent.id, name = %agent.name, "agent created");
        Ok(agent)
    }

    async fn list_voices(&self) -> Result<Vec<VoiceAsset>, ClientError> {
        let url = self.endpoint(VOICES_PATH)?;
        let response = self.send(self.http.get(url)).await?;
        Ok(decode::<Listing<VoiceAsset>>(response, self.timeout)
            .await?
            .into_vec())
    }

    async fn clone_voice(
        &self,
        sample: &VoiceSample,
        voice_name: &str,
    ) -> Result<VoiceAsset, ClientError> {
        let url = self.endpoint(CLONE_VOICE_PATH)?;
        let part = Part::bytes(sample.bytes.clone())
            .file_name(sample.file_name.clone())
            .mime_str(&sample.mime_type)
            .map_err(|e| ClientError::InvalidRequest(format!("voice sample mime type: {e}")))?;
        let form = Form::new()
            .part("voice_sample", part)
            .text("voice_name", voice_name.to_string());

        debug!(
            file = %sample.file_name,
            bytes = sample.len(),
            voice_name,
            "uploading voice sample"
        );
        let response = self.send(self.http.post(url).multipart(form)).await?;
        let voice = decode::<Record<VoiceAsset>>(response, self.timeout)
            .await?
            .into_inner();
        info!(voice_id = %voice.id, "voice cloned");
        Ok(voice)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    // Url::join replaces the last path segment unless the base ends in '/'.
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::InvalidUrl(format!(
            "{raw}: unsupported scheme {other:?}"
        ))),
    }
}

fn classify(error: reqwest::Error, timeout: Duration) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout(timeout)
    } else {
        ClientError::Transport(error)
    }
}

async fn decode<T: DeserializeOwned>(response: Response, timeout: Duration) -> Result<T, ClientError> {
    let bytes = response.bytes().await.map_err(|e| classify(e, timeout))?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}
