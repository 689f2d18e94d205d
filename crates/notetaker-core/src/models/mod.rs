//! Data models for Notetaker

mod note;

pub use note::{Note, NoteId};
