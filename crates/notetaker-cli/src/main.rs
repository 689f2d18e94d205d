//! Notetaker CLI - list, add, and delete notes on a managed GraphQL backend
//!
//! One-shot commands plus an interactive session that mirrors the note form.

mod backend;
mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::backend::BackendOverrides;
use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::list::run_list;
use crate::commands::session::run_session;
use crate::error::CliError;

const DEFAULT_LOG_DIRECTIVE: &str = "notetaker=warn";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = BackendOverrides {
        profile: cli.profile,
        endpoint: cli.endpoint,
        api_key: cli.api_key,
        auth_token: cli.auth_token,
    };

    match cli.command {
        Some(Commands::Add { title }) => run_add(&title, &overrides).await?,
        Some(Commands::List { json }) => run_list(json, &overrides).await?,
        Some(Commands::Delete { id }) => run_delete(&id, &overrides).await?,
        Some(Commands::Session) => run_session(&overrides).await?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Config { command }) => run_config(command, &overrides)?,
        None => {
            // Quick capture mode: notetaker "my note"
            if cli.note.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                run_add(&cli.note, &overrides).await?;
            }
        }
    }

    Ok(())
}
