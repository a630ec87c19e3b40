use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use voxagent_cli::commands::{resolve_config, run};
use voxagent_cli::config::LoggingConfig;
use voxagent_cli::Cli;

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };
    init_logging(&config.logging);

    tracing::debug!(
        backend = %config.backend.base_url,
        timeout_ms = config.backend.timeout_ms,
        "configuration loaded"
    );

    let mut stdout = std::io::stdout().lock();
    match run(cli.command, &config, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
