use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::RawId;

/// An agent as stored by the backend.
///
/// The client never edits these; it only replaces its cached list with
/// whatever the backend returns. Both the camelCase shape the create
/// endpoint echoes and the snake_case shape of the agent store are
/// accepted, including records that carry both. Fields the client does
/// not model are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AgentRecord")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub role: String,
    pub language: String,
    pub llm_model: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire form of [`Agent`]. Every spelling is its own field, so a record
/// carrying several of them is not a duplicate-field error. The camelCase
/// spelling wins.
#[derive(Deserialize)]
struct AgentRecord {
    id: RawId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    job_role: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default, rename = "llmModel")]
    llm_model_camel: Option<String>,
    #[serde(default)]
    llm_model: Option<String>,
    #[serde(default)]
    llm_provider: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<AgentRecord> for Agent {
    fn from(record: AgentRecord) -> Self {
        Self {
            id: record.id.into(),
            name: record.name.unwrap_or_default(),
            role: record.role.or(record.job_role).unwrap_or_default(),
            language: record.language.unwrap_or_default(),
            llm_model: record
                .llm_model_camel
                .or(record.llm_model)
                .or(record.llm_provider)
                .unwrap_or_default(),
            extra: record.extra,
        }
    }
}

impl Agent {
    /// Looks up a backend field the struct does not model directly.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}
