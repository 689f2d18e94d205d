//! Local note list state and the transitions applied to it.
//!
//! Every transition takes the payload a remote operation resolved with
//! (already collapsed to an `Option`) and only mutates state when the server
//! actually confirmed something. There is no optimistic insert or removal.
//! A note with a blank id counts as absent, so local notes always carry an id
//! that can be sent back to the server.

use serde::Serialize;

use crate::models::{Note, NoteId};

/// Whether a transition changed the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The server result was applied.
    Applied,
    /// The server result was absent; state is untouched.
    Unchanged,
}

/// Client-side mirror of the remote note collection plus the pending draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteListState {
    /// Remote listing order, then append order for local creations
    pub notes: Vec<Note>,
    /// Uncommitted input for the next note
    pub draft_title: String,
}

impl NoteListState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the draft. Empty strings are allowed.
    pub fn update_draft(&mut self, value: impl Into<String>) {
        self.draft_title = value.into();
    }

    /// Replace the collection with a fetched listing.
    ///
    /// `None` means the response carried no listing at all, which leaves the
    /// collection as it was. Null and blank-id entries inside a listing are
    /// dropped.
    pub fn apply_fetch_result(&mut self, items: Option<Vec<Option<Note>>>) -> Transition {
        let Some(items) = items else {
            return Transition::Unchanged;
        };

        self.notes = filter_present(items);
        Transition::Applied
    }

    /// Append a server-created note and clear the draft.
    ///
    /// Without a created note the draft is kept so the input can be retried.
    pub fn apply_create_result(&mut self, created: Option<Note>) -> Transition {
        let Some(note) = created.filter(has_id) else {
            return Transition::Unchanged;
        };

        self.notes.push(note);
        self.draft_title.clear();
        Transition::Applied
    }

    /// Remove the note whose id matches the one the server reports as deleted.
    pub fn apply_delete_result(&mut self, deleted: Option<Note>) -> Transition {
        let Some(deleted) = deleted.filter(has_id) else {
            return Transition::Unchanged;
        };

        if let Some(index) = self.position(&deleted.id) {
            self.notes.remove(index);
        }
        Transition::Applied
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| &note.id == id)
    }
}

/// Drop absent entries from a listing, preserving order.
pub fn filter_present(items: Vec<Option<Note>>) -> Vec<Note> {
    items.into_iter().flatten().filter(has_id).collect()
}

fn has_id(note: &Note) -> bool {
    !note.id.is_blank()
}
