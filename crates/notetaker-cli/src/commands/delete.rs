use notetaker_core::Outcome;

use crate::backend::{open_controller, BackendOverrides};
use crate::commands::common::resolve_note_id;
use crate::error::CliError;

pub async fn run_delete(id: &str, overrides: &BackendOverrides) -> Result<(), CliError> {
    let controller = open_controller(overrides)?;

    // Prefix resolution needs the listing; without it the id is sent verbatim.
    if controller.initialize().await != Outcome::Applied {
        tracing::warn!("Could not load notes; deleting by literal id");
    }
    let note_id = resolve_note_id(id, &controller.notes().await)?;

    CliError::check(controller.delete_note(&note_id).await, "delete note")?;
    println!("{note_id}");
    Ok(())
}
