//! Voice library records and upload payloads.
//!
//! A [`VoiceAsset`] is a cloned voice owned by the backend. A
//! [`VoiceSample`] is the audio file a user uploads to create one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::RawId;

/// Prefix of the generated name attached to every clone request.
pub const CLONED_VOICE_PREFIX: &str = "cloned-voice-";

/// Generates the voice name sent with a clone request.
///
/// Names are distinguished by millisecond timestamp only. Two uploads in
/// the same millisecond collide, which upload frequency makes unlikely.
pub fn clone_voice_name(at: DateTime<Utc>) -> String {
    format!("{CLONED_VOICE_PREFIX}{}", at.timestamp_millis())
}

/// A cloned voice profile as stored by the backend.
///
/// Library entries written by the cloning service carry only a `name`;
/// for those the name doubles as the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VoiceRecord")]
pub struct VoiceAsset {
    pub id: String,
    pub name: String,
    pub provider: Option<String>,
    pub language: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire form of [`VoiceAsset`]. Id and name spellings are separate fields
/// so a record carrying several of them still decodes.
#[derive(Deserialize)]
struct VoiceRecord {
    #[serde(default)]
    id: Option<RawId>,
    #[serde(default)]
    voice_id: Option<RawId>,
    #[serde(default, rename = "voiceId")]
    voice_id_camel: Option<RawId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    voice_name: Option<String>,
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<VoiceRecord> for VoiceAsset {
    type Error = &'static str;

    fn try_from(record: VoiceRecord) -> Result<Self, Self::Error> {
        let name = record.name.or(record.voice_name);
        let id = record
            .id
            .or(record.voice_id)
            .or(record.voice_id_camel)
            .map(String::from)
            .or_else(|| name.clone())
            .ok_or("voice record has neither an id nor a name")?;

        Ok(Self {
            id,
            name: name.unwrap_or_default(),
            provider: record.provider,
            language: record.language,
            extra: record.extra,
        })
    }
}

impl VoiceAsset {
    /// Name to show for this voice, falling back to its id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// An audio sample selected for upload.
///
/// Expected formats are WAV, MP3 or OGG with a length of two to five
/// minutes. Neither is enforced client-side.
#[derive(Clone, PartialEq, Eq)]
pub struct VoiceSample {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for VoiceSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceSample")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl VoiceSample {
    /// Wraps in-memory audio, deriving the MIME type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Reads a sample from disk.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "voice-sample".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}
