//! Backend client for the Voxagent agent registry and voice library.
//!
//! The backend is an external collaborator. This crate fixes the seam a
//! session talks through ([`AgentBackend`]) and provides the HTTP
//! implementation used in production ([`HttpBackend`]):
//!
//! | Call | Endpoint |
//! |------|----------|
//! | [`AgentBackend::list_agents`] | `GET /api/agents` |
//! | [`AgentBackend::create_agent`] | `POST /api/agents` (JSON) |
//! | [`AgentBackend::list_voices`] | `GET /api/voices` |
//! | [`AgentBackend::clone_voice`] | `POST /api/voices/clone` (multipart) |
//!
//! Every request is bounded by the configured timeout.

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
mod wire;

pub use backend::AgentBackend;
pub use config::{BackendConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
pub use error::ClientError;
pub use http::{HealthStatus, HttpBackend};
