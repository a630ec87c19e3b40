//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Configure voice agents and clone voices against a voxagent backend.
#[derive(Debug, Parser)]
#[command(name = "voxagent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path.
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "VOXAGENT_CONFIG_PATH",
        default_value = "voxagent.toml"
    )]
    pub config: PathBuf,

    /// Backend base URL. Overrides the config file and environment.
    #[arg(long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the languages and models an agent can use.
    Catalog,

    /// Check that the backend is reachable.
    Status,

    /// Manage agents.
    #[command(subcommand)]
    Agents(AgentsCommand),

    /// Manage the voice library.
    #[command(subcommand)]
    Voices(VoicesCommand),
}

#[derive(Debug, Subcommand)]
pub enum AgentsCommand {
    /// List configured agents.
    List {
        /// Only show agents for this language code.
        #[arg(long)]
        language: Option<String>,
    },

    /// Show one agent's full record.
    Show { id: String },

    /// Create an agent.
    Create(CreateArgs),
}

#[derive(Debug, Subcommand)]
pub enum VoicesCommand {
    /// List voices in the library.
    List,

    /// Clone a voice from an audio sample.
    Clone {
        /// Audio file (wav, mp3, m4a, ogg, ...).
        path: PathBuf,
    },
}

/// Draft fields for `agents create`. Unset options keep catalog defaults.
#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub role: String,

    #[arg(long = "instruction", value_name = "TEXT")]
    pub system_instruction: String,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub llm_model: Option<String>,

    #[arg(long)]
    pub tts_voice: Option<String>,

    #[arg(long)]
    pub tts_model: Option<String>,

    #[arg(long)]
    pub stt_model: Option<String>,
}
