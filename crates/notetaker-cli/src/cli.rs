use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "notetaker")]
#[command(about = "List, add, and delete notes on a managed GraphQL backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Profile name for backend configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// GraphQL endpoint override
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// API key override (sent as x-api-key)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Auth token issued by the hosted sign-in flow (never persisted)
    #[arg(long, global = true, value_name = "TOKEN")]
    pub auth_token: Option<String>,

    /// Quick capture: notetaker "my note here"
    #[arg(trailing_var_arg = true)]
    pub note: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        title: Vec<String>,
    },
    /// List all notes
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Interactive session: type titles to add notes, /help for commands
    Session,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure backend profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update a profile from --endpoint and --api-key
    Init {
        /// Request timeout in seconds (0 disables the timeout)
        #[arg(long, value_name = "SECONDS")]
        timeout_secs: Option<u64>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved configuration for the selected profile
    Show,
}
