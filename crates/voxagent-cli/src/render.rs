//! Plain-text rendering of catalog and collection data.

use std::io::{self, Write};
use voxagent_types::{Agent, Catalog, ModelOption, VoiceAsset};

pub const NO_AGENTS_MESSAGE: &str = "No agents created yet. Create your first agent above!";
pub const NO_VOICES_MESSAGE: &str = "No voices in the library yet.";

pub fn render_catalog(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    writeln!(out, "Languages:")?;
    for language in &catalog.languages {
        writeln!(out, "  {:<8} {}", language.code, language.name)?;
    }
    render_models(out, "LLM models", &catalog.llm_models)?;
    render_models(out, "TTS models", &catalog.tts_models)?;
    render_models(out, "STT models", &catalog.stt_models)?;
    writeln!(out, "Default voice: {}", catalog.default_voice)
}

fn render_models(out: &mut impl Write, heading: &str, models: &[ModelOption]) -> io::Result<()> {
    writeln!(out, "{heading}:")?;
    for model in models {
        writeln!(out, "  {:<16} {}", model.id, model.label())?;
    }
    Ok(())
}

/// One line per agent: name, role, language and model.
pub fn render_agents(out: &mut impl Write, agents: &[Agent]) -> io::Result<()> {
    if agents.is_empty() {
        return writeln!(out, "{NO_AGENTS_MESSAGE}");
    }
    for agent in agents {
        writeln!(
            out,
            "{}  {} ({})  language={} model={}",
            agent.id, agent.name, agent.role, agent.language, agent.llm_model
        )?;
    }
    Ok(())
}

pub fn render_voices(out: &mut impl Write, voices: &[VoiceAsset]) -> io::Result<()> {
    if voices.is_empty() {
        return writeln!(out, "{NO_VOICES_MESSAGE}");
    }
    for voice in voices {
        write!(out, "{}  {}", voice.id, voice.display_name())?;
        if let Some(provider) = &voice.provider {
            write!(out, "  [{provider}]")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
