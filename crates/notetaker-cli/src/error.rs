use std::io;

use notetaker_core::Outcome;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notetaker_core::Error),
    #[error(transparent)]
    Remote(#[from] notetaker_core::RemoteError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Note not found for id/position: {0}")]
    NoteNotFound(String),
    #[error("{0}")]
    AmbiguousNoteId(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "Backend is not configured. Run `notetaker config init --endpoint <URL>` or set NOTETAKER_GRAPHQL_ENDPOINT."
    )]
    BackendNotConfigured,
    #[error("Could not {action}: {reason}")]
    NotApplied {
        action: &'static str,
        reason: &'static str,
    },
}

impl CliError {
    /// Map a controller outcome to an error for one-shot commands.
    pub fn check(outcome: Outcome, action: &'static str) -> Result<(), Self> {
        let reason = match outcome {
            Outcome::Applied => return Ok(()),
            Outcome::NoData => "the server returned no result",
            Outcome::Failed => "the request failed (run with RUST_LOG=notetaker=debug for details)",
        };
        Err(Self::NotApplied { action, reason })
    }
}
