//! Command-line front end for voxagent.
//!
//! The binary is a thin wrapper: parse [`cli::Cli`], load a
//! [`config::Config`], initialise logging, then hand off to
//! [`commands::run`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use cli::Cli;
pub use config::{load_config, Config, ConfigError};
pub use error::CliError;
