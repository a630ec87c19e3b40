//! The client-local agent draft and its validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, ModelKind};

/// An agent under construction.
///
/// Serialised in camelCase, which is the shape the backend's create
/// endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDraft {
    pub name: String,
    pub role: String,
    pub system_instruction: String,
    pub language: String,
    pub llm_model: String,
    pub tts_voice: String,
    pub tts_model: String,
    pub stt_model: String,
}

/// One editable field of an [`AgentDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Role,
    SystemInstruction,
    Language,
    LlmModel,
    TtsVoice,
    TtsModel,
    SttModel,
}

impl DraftField {
    pub const ALL: [DraftField; 8] = [
        Self::Name,
        Self::Role,
        Self::SystemInstruction,
        Self::Language,
        Self::LlmModel,
        Self::TtsVoice,
        Self::TtsModel,
        Self::SttModel,
    ];

    /// Fields that must be non-blank before a draft can be submitted.
    pub const REQUIRED: [DraftField; 3] = [Self::Name, Self::Role, Self::SystemInstruction];

    /// Returns the wire (camelCase) name of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Role => "role",
            Self::SystemInstruction => "systemInstruction",
            Self::Language => "language",
            Self::LlmModel => "llmModel",
            Self::TtsVoice => "ttsVoice",
            Self::TtsModel => "ttsModel",
            Self::SttModel => "sttModel",
        }
    }

    /// The catalog table an enumerated field must draw from, if any.
    pub fn model_kind(self) -> Option<ModelKind> {
        match self {
            Self::LlmModel => Some(ModelKind::Llm),
            Self::TtsModel => Some(ModelKind::Tts),
            Self::SttModel => Some(ModelKind::Stt),
            _ => None,
        }
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DraftField {
    type Err = ParseDraftFieldError;

    /// Accepts the camelCase wire name or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "role" => Ok(Self::Role),
            "systemInstruction" | "system_instruction" => Ok(Self::SystemInstruction),
            "language" => Ok(Self::Language),
            "llmModel" | "llm_model" => Ok(Self::LlmModel),
            "ttsVoice" | "tts_voice" => Ok(Self::TtsVoice),
            "ttsModel" | "tts_model" => Ok(Self::TtsModel),
            "sttModel" | "stt_model" => Ok(Self::SttModel),
            _ => Err(ParseDraftFieldError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown draft field name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown draft field: {0}")]
pub struct ParseDraftFieldError(pub String);

/// Reasons a draft cannot be submitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<DraftField>),

    #[error("unknown {field} option: {value:?}")]
    UnknownOption { field: DraftField, value: String },
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AgentDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Role => &self.role,
            DraftField::SystemInstruction => &self.system_instruction,
            DraftField::Language => &self.language,
            DraftField::LlmModel => &self.llm_model,
            DraftField::TtsVoice => &self.tts_voice,
            DraftField::TtsModel => &self.tts_model,
            DraftField::SttModel => &self.stt_model,
        }
    }

    /// Replaces one field. No validation happens here.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::Name => &mut self.name,
            DraftField::Role => &mut self.role,
            DraftField::SystemInstruction => &mut self.system_instruction,
            DraftField::Language => &mut self.language,
            DraftField::LlmModel => &mut self.llm_model,
            DraftField::TtsVoice => &mut self.tts_voice,
            DraftField::TtsModel => &mut self.tts_model,
            DraftField::SttModel => &mut self.stt_model,
        };
        *slot = value.into();
    }

    /// Required fields that are empty or whitespace-only, in field order.
    pub fn missing_required(&self) -> Vec<DraftField> {
        DraftField::REQUIRED
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Checks the draft is submittable against `catalog`.
    ///
    /// Missing required fields are reported before unknown options.
    /// `ttsVoice` is free-form (cloned voice ids are not in the catalog)
    /// and only has to be non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] describing the first problem found.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), DraftError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(DraftError::MissingFields(missing));
        }

        if !catalog.has_language(&self.language) {
            return Err(DraftError::UnknownOption {
                field: DraftField::Language,
                value: self.language.clone(),
            });
        }

        for field in [DraftField::LlmModel, DraftField::TtsModel, DraftField::SttModel] {
            if let Some(kind) = field.model_kind() {
                let value = self.get(field);
                if !catalog.has_model(kind, value) {
                    return Err(DraftError::UnknownOption {
                        field,
                        value: value.to_string(),
                    });
                }
            }
        }

        if self.tts_voice.trim().is_empty() {
            return Err(DraftError::UnknownOption {
                field: DraftField::TtsVoice,
                value: self.tts_voice.clone(),
            });
        }

        Ok(())
    }

    /// Builds the create-endpoint payload for this draft.
    pub fn to_create_request(&self) -> CreateAgentRequest<'_> {
        CreateAgentRequest {
            draft: self,
            voice_id: &self.tts_voice,
        }
    }
}

/// Body of `POST /api/agents`: every draft field plus `voiceId`, an alias
/// of `ttsVoice` kept for backends that read the older name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest<'a> {
    #[serde(flatten)]
    pub draft: &'a AgentDraft,
    pub voice_id: &'a str,
}
