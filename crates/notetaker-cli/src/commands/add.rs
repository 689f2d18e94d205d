use crate::backend::{open_controller, BackendOverrides};
use crate::commands::common::resolve_note_title;
use crate::error::CliError;

pub async fn run_add(title_parts: &[String], overrides: &BackendOverrides) -> Result<(), CliError> {
    let title = resolve_note_title(title_parts)?;

    let controller = open_controller(overrides)?;
    controller.update_draft(title).await;
    let (outcome, created) = controller.submit_draft_with_note().await;
    CliError::check(outcome, "create note")?;

    if let Some(note) = created {
        println!("{}", note.id);
    }
    Ok(())
}
