//! notetaker-core - Core library for Notetaker
//!
//! This crate contains the note model, the local note list state and its
//! reconciliation rules, and the remote store seam with its GraphQL transport,
//! shared by every Notetaker interface.

pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod remote;
pub mod state;

pub use config::{BackendAuth, BackendConfig};
pub use controller::{NoteListController, Outcome};
pub use error::{Error, Result};
pub use models::{Note, NoteId};
pub use remote::{GraphQlNoteStore, NoteStore, RemoteError};
pub use state::NoteListState;
