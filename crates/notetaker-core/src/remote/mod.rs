//! Remote note store seam.
//!
//! The managed backend exposes three operations. Response shapes mirror the
//! GraphQL payloads exactly, with every level optional, so that an absent
//! field is distinguishable from an empty one.

pub mod documents;
mod graphql;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Note, NoteId};

pub use graphql::GraphQlNoteStore;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Invalid remote store configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Remote request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote API error: {0}")]
    Api(String),
    #[error("Invalid remote payload: {0}")]
    InvalidPayload(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// The authoritative note store.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Fetch the full note listing.
    async fn list_notes(&self) -> RemoteResult<ListNotesResponse>;

    /// Create a note with the given title.
    async fn create_note(&self, input: CreateNoteInput) -> RemoteResult<CreateNoteResponse>;

    /// Delete the note with the given id.
    async fn delete_note(&self, input: DeleteNoteInput) -> RemoteResult<DeleteNoteResponse>;
}

#[async_trait]
impl<S: NoteStore + ?Sized> NoteStore for std::sync::Arc<S> {
    async fn list_notes(&self) -> RemoteResult<ListNotesResponse> {
        (**self).list_notes().await
    }

    async fn create_note(&self, input: CreateNoteInput) -> RemoteResult<CreateNoteResponse> {
        (**self).create_note(input).await
    }

    async fn delete_note(&self, input: DeleteNoteInput) -> RemoteResult<DeleteNoteResponse> {
        (**self).delete_note(input).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateNoteInput {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteNoteInput {
    pub id: NoteId,
}

/// Variables wrapper shared by the mutations: `{ "input": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationVariables<T> {
    pub input: T,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListNotesResponse {
    #[serde(default)]
    pub data: Option<ListNotesData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListNotesData {
    #[serde(default, rename = "listNotes")]
    pub list_notes: Option<NoteConnection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteConnection {
    #[serde(default)]
    pub items: Option<Vec<Option<Note>>>,
    #[serde(default, rename = "nextToken")]
    pub next_token: Option<String>,
}

impl ListNotesResponse {
    #[cfg(test)]
    pub(crate) fn with_items(items: Vec<Option<Note>>) -> Self {
        Self {
            data: Some(ListNotesData {
                list_notes: Some(NoteConnection {
                    items: Some(items),
                    next_token: None,
                }),
            }),
        }
    }

    /// Collapse `data.listNotes.items` into the raw (unfiltered) listing.
    pub fn into_items(self) -> Option<Vec<Option<Note>>> {
        self.data?.list_notes?.items
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateNoteResponse {
    #[serde(default)]
    pub data: Option<CreateNoteData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateNoteData {
    #[serde(default, rename = "createNote")]
    pub create_note: Option<Note>,
}

impl CreateNoteResponse {
    #[cfg(test)]
    pub(crate) fn created(note: Note) -> Self {
        Self {
            data: Some(CreateNoteData {
                create_note: Some(note),
            }),
        }
    }

    pub fn into_created(self) -> Option<Note> {
        self.data?.create_note
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteNoteResponse {
    #[serde(default)]
    pub data: Option<DeleteNoteData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteNoteData {
    #[serde(default, rename = "deleteNote")]
    pub delete_note: Option<Note>,
}

impl DeleteNoteResponse {
    #[cfg(test)]
    pub(crate) fn deleted(note: Note) -> Self {
        Self {
            data: Some(DeleteNoteData {
                delete_note: Some(note),
            }),
        }
    }

    pub fn into_deleted(self) -> Option<Note> {
        self.data?.delete_note
    }
}
