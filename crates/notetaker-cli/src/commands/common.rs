use std::io::{self, IsTerminal, Read};

use notetaker_core::{Note, NoteId};
use serde::Serialize;

use crate::error::CliError;

const SHORT_ID_LEN: usize = 13;
const PREVIEW_LEN: usize = 60;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
    }
}

/// Render one row per note: position, short id, title preview.
pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .enumerate()
        .map(|(index, note)| {
            let short_id = short_id(&note.id);
            let preview = note.title_preview(PREVIEW_LEN);
            format!("{:>3}  {short_id:<13}  {preview}", index + 1)
        })
        .collect()
}

pub fn short_id(id: &NoteId) -> String {
    id.as_str().chars().take(SHORT_ID_LEN).collect()
}

/// Join title words; fall back to piped stdin when no words were given.
///
/// Empty titles are allowed and forwarded as-is.
pub fn resolve_note_title(title_parts: &[String]) -> Result<String, CliError> {
    if !title_parts.is_empty() {
        return Ok(title_parts.join(" "));
    }

    Ok(read_piped_stdin()?.unwrap_or_default())
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(Some(buffer.trim_end_matches(['\r', '\n']).to_string()))
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Resolve a user-typed id against the local notes.
///
/// Accepts an exact id, a unique id prefix, or `#n` for the n-th listed note.
/// An unknown id is returned unchanged so the server decides.
pub fn resolve_note_id(query: &str, notes: &[Note]) -> Result<NoteId, CliError> {
    let query = normalize_note_identifier(query)?;

    if let Some(position) = query.strip_prefix('#') {
        if let Ok(position) = position.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|index| notes.get(index))
                .map(|note| note.id.clone())
                .ok_or_else(|| CliError::NoteNotFound(format!("#{position}")));
        }
    }

    if notes.iter().any(|note| note.id.as_str() == query) {
        return Ok(NoteId::new(query));
    }

    let matching = notes
        .iter()
        .filter(|note| note.id.as_str().starts_with(&query))
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Ok(NoteId::new(query)),
        [note] => Ok(note.id.clone()),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|note| short_id(&note.id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}
