//! Subcommand execution.
//!
//! Mutating commands go through an [`AgentSession`] so they get the same
//! validation, single-flight handling and notices as an interactive front
//! end. Output is written to a caller-supplied writer.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use voxagent_client::HttpBackend;
use voxagent_session::{AgentSession, SubmitOutcome, UploadOutcome};
use voxagent_types::{DraftField, VoiceSample};

use crate::cli::{AgentsCommand, Cli, Command, CreateArgs, VoicesCommand};
use crate::config::{load_config, Config};
use crate::error::CliError;
use crate::render::{render_agents, render_catalog, render_voices};

type Session = AgentSession<HttpBackend>;

/// Loads the configuration named by `cli` and applies its overrides.
///
/// # Errors
///
/// Returns [`CliError::Config`] if the file cannot be read or parsed.
pub fn resolve_config(cli: &Cli) -> Result<Config, CliError> {
    let path = cli.config.to_string_lossy();
    let mut config = load_config(Some(&path))?;
    if let Some(url) = &cli.backend_url {
        config.backend.base_url = url.clone();
    }
    Ok(config)
}

/// Runs one subcommand against the backend described by `config`.
///
/// # Errors
///
/// Returns a [`CliError`] if the backend call fails, a draft is rejected,
/// or output cannot be written.
pub async fn run(command: Command, config: &Config, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Catalog => {
            render_catalog(out, &config.catalog.build())?;
            Ok(())
        }
        Command::Status => status(&open_session(config)?, out).await,
        Command::Agents(command) => agents(&open_session(config)?, command, out).await,
        Command::Voices(command) => voices(&open_session(config)?, command, out).await,
    }
}

fn open_session(config: &Config) -> Result<Session, CliError> {
    let backend = HttpBackend::new(&config.backend)?;
    debug!(base_url = backend.base_url(), "opening session");
    Ok(AgentSession::with_settings(
        backend,
        Arc::new(config.catalog.build()),
        config.session.settings(),
    ))
}

async fn status(session: &Session, out: &mut impl Write) -> Result<(), CliError> {
    let health = session.backend().health().await?;
    match health.service {
        Some(service) => writeln!(
            out,
            "{}: {} ({service})",
            session.backend().base_url(),
            health.status
        )?,
        None => writeln!(out, "{}: {}", session.backend().base_url(), health.status)?,
    }
    Ok(())
}

async fn agents(
    session: &Session,
    command: AgentsCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        AgentsCommand::List {
            language: Some(code),
        } => {
            let agents = session.backend().list_agents_by_language(&code).await?;
            render_agents(out, &agents)?;
        }
        AgentsCommand::List { language: None } => {
            session.refresh_agents().await?;
            render_agents(out, &session.snapshot().agents)?;
        }
        AgentsCommand::Show { id } => {
            let agent = session.backend().get_agent(&id).await?;
            writeln!(out, "{}", pretty_json(&agent)?)?;
        }
        AgentsCommand::Create(args) => create_agent(session, args, out).await?,
    }
    Ok(())
}

async fn voices(
    session: &Session,
    command: VoicesCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        VoicesCommand::List => {
            session.refresh_voices().await?;
            render_voices(out, &session.snapshot().voices)?;
            Ok(())
        }
        VoicesCommand::Clone { path } => clone_voice(session, &path, out).await,
    }
}

async fn create_agent(
    session: &Session,
    args: CreateArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let fields = [
        (DraftField::Name, Some(args.name)),
        (DraftField::Role, Some(args.role)),
        (DraftField::SystemInstruction, Some(args.system_instruction)),
        (DraftField::Language, args.language),
        (DraftField::LlmModel, args.llm_model),
        (DraftField::TtsVoice, args.tts_voice),
        (DraftField::TtsModel, args.tts_model),
        (DraftField::SttModel, args.stt_model),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            session.update_field(field, value);
        }
    }

    match session.submit_agent().await {
        SubmitOutcome::Created(agent) => {
            info!(agent_id = %agent.id, "created agent from cli");
            writeln!(out, "{}", session.snapshot().message())?;
            writeln!(out, "id: {}", agent.id)?;
            render_agents(out, &session.snapshot().agents)?;
            Ok(())
        }
        SubmitOutcome::Rejected(e) => Err(CliError::Draft(e)),
        SubmitOutcome::Failed(_) | SubmitOutcome::Busy => {
            Err(CliError::Rejected(failure_message(session)))
        }
    }
}

async fn clone_voice(session: &Session, path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let sample = VoiceSample::from_path(path).map_err(|source| CliError::ReadSample {
        path: path.display().to_string(),
        source,
    })?;

    match session.upload_voice_sample(Some(sample)).await {
        UploadOutcome::Cloned(voice) => {
            writeln!(out, "{}", session.snapshot().message())?;
            writeln!(out, "id: {}", voice.id)?;
            Ok(())
        }
        UploadOutcome::Failed(_) | UploadOutcome::Busy | UploadOutcome::NoFile => {
            Err(CliError::Rejected(failure_message(session)))
        }
    }
}

fn failure_message(session: &Session) -> String {
    let snapshot = session.snapshot();
    if snapshot.message().is_empty() {
        "another request is in flight".to_string()
    } else {
        snapshot.message().to_string()
    }
}

fn pretty_json(value: &impl serde::Serialize) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Output(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
