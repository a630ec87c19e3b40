//! Option catalog: the fixed tables an agent draft may choose from.
//!
//! The catalog is plain configuration data. Sessions receive it at
//! construction, so deployments and tests can swap the tables without
//! touching any other code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::AgentDraft;

/// Voice id used when the user has not picked a cloned voice.
pub const DEFAULT_TTS_VOICE: &str = "default-indian";

/// A selectable spoken language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    /// BCP-47 style code sent to the backend (e.g. `hi-IN`).
    pub code: String,
    /// Human-readable name.
    pub name: String,
}

/// Whether a provider model is usable without a paid plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingTier {
    #[default]
    Free,
    Paid,
}

impl PricingTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Paid => "Paid",
        }
    }
}

/// Which model table an option belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Llm,
    Tts,
    Stt,
}

impl ModelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::Tts => "tts",
            Self::Stt => "stt",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable LLM, TTS or STT model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    /// Identifier sent to the backend.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Upstream provider slug.
    pub provider: String,
    #[serde(default)]
    pub tier: PricingTier,
}

impl ModelOption {
    fn new(id: &str, name: &str, provider: &str, tier: PricingTier) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            provider: provider.to_string(),
            tier,
        }
    }

    /// Display label, e.g. `Groq Mixtral 8x7B (Free)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.tier.label())
    }
}

/// Errors describing a catalog that cannot back a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no languages")]
    NoLanguages,

    #[error("catalog has no {0} models")]
    NoModels(ModelKind),

    #[error("catalog default voice is empty")]
    NoDefaultVoice,
}

/// The complete set of options an agent draft may take.
///
/// The first entry of every table is the draft default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub languages: Vec<LanguageOption>,
    pub llm_models: Vec<ModelOption>,
    pub tts_models: Vec<ModelOption>,
    pub stt_models: Vec<ModelOption>,
    pub default_voice: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The stock tables: nine Indian languages and the supported provider
    /// models.
    pub fn builtin() -> Self {
        use PricingTier::{Free, Paid};

        let languages = [
            ("hi-IN", "Hindi"),
            ("ta-IN", "Tamil"),
            ("te-IN", "Telugu"),
            ("kn-IN", "Kannada"),
            ("ml-IN", "Malayalam"),
            ("bn-IN", "Bengali"),
            ("gu-IN", "Gujarati"),
            ("mr-IN", "Marathi"),
            ("en-IN", "English (Indian)"),
        ]
        .into_iter()
        .map(|(code, name)| LanguageOption {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect();

        Self {
            languages,
            llm_models: vec![
                ModelOption::new("groq-mixtral", "Groq Mixtral 8x7B", "groq", Free),
                ModelOption::new("groq-llama2", "Groq Llama 2 70B", "groq", Free),
                ModelOption::new("gpt-4", "OpenAI GPT-4", "openai", Paid),
                ModelOption::new("claude-3", "Anthropic Claude 3", "anthropic", Paid),
            ],
            tts_models: vec![
                ModelOption::new("google-tts", "Google Cloud TTS", "google", Free),
                ModelOption::new("elevenlabs-v2", "ElevenLabs V2", "elevenlabs", Paid),
                ModelOption::new("replicate-xtts", "Replicate XTTS", "replicate", Free),
                ModelOption::new("azure-speech", "Azure Speech", "azure", Paid),
                ModelOption::new("cartesia", "Cartesia", "cartesia", Paid),
            ],
            stt_models: vec![
                ModelOption::new("google-stt", "Google Cloud Speech-to-Text", "google", Free),
                ModelOption::new("openai-whisper", "OpenAI Whisper", "openai", Paid),
                ModelOption::new("groq-whisper", "Groq Whisper", "groq", Free),
                ModelOption::new("assemblyai", "AssemblyAI", "assemblyai", Paid),
                ModelOption::new("deepgram", "Deepgram", "deepgram", Paid),
                ModelOption::new("azure-stt", "Azure Speech Recognition", "azure", Paid),
            ],
            default_voice: DEFAULT_TTS_VOICE.to_string(),
        }
    }

    /// Checks that every table has at least one entry, so a default draft
    /// can be built.
    pub fn check(&self) -> Result<(), CatalogError> {
        if self.languages.is_empty() {
            return Err(CatalogError::NoLanguages);
        }
        for kind in [ModelKind::Llm, ModelKind::Tts, ModelKind::Stt] {
            if self.models(kind).is_empty() {
                return Err(CatalogError::NoModels(kind));
            }
        }
        if self.default_voice.trim().is_empty() {
            return Err(CatalogError::NoDefaultVoice);
        }
        Ok(())
    }

    pub fn models(&self, kind: ModelKind) -> &[ModelOption] {
        match kind {
            ModelKind::Llm => &self.llm_models,
            ModelKind::Tts => &self.tts_models,
            ModelKind::Stt => &self.stt_models,
        }
    }

    pub fn model(&self, kind: ModelKind, id: &str) -> Option<&ModelOption> {
        self.models(kind).iter().find(|m| m.id == id)
    }

    pub fn has_model(&self, kind: ModelKind, id: &str) -> bool {
        self.model(kind, id).is_some()
    }

    pub fn language(&self, code: &str) -> Option<&LanguageOption> {
        self.languages.iter().find(|l| l.code == code)
    }

    pub fn has_language(&self, code: &str) -> bool {
        self.language(code).is_some()
    }

    /// Builds the draft a fresh session starts from and returns to after a
    /// successful create.
    pub fn default_draft(&self) -> AgentDraft {
        fn first_id(models: &[ModelOption]) -> String {
            models.first().map(|m| m.id.clone()).unwrap_or_default()
        }

        AgentDraft {
            name: String::new(),
            role: String::new(),
            system_instruction: String::new(),
            language: self
                .languages
                .first()
                .map(|l| l.code.clone())
                .unwrap_or_default(),
            llm_model: first_id(&self.llm_models),
            tts_voice: self.default_voice.clone(),
            tts_model: first_id(&self.tts_models),
            stt_model: first_id(&self.stt_models),
        }
    }
}
