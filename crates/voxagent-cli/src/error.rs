use thiserror::Error;
use voxagent_client::ClientError;
use voxagent_types::DraftError;

use crate::config::ConfigError;

/// Errors that end a CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("invalid agent: {0}")]
    Draft(#[from] DraftError),

    /// A session action failed; carries the notice text shown to the user.
    #[error("{0}")]
    Rejected(String),

    #[error("failed to read {path}: {source}")]
    ReadSample {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 78,
            Self::Draft(_) => 65,
            Self::ReadSample { .. } => 66,
            Self::Client(_) | Self::Rejected(_) => 1,
            Self::Output(_) => 74,
        }
    }
}
