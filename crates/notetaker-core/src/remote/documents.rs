//! GraphQL documents for the managed note schema.

pub const LIST_NOTES_OPERATION: &str = "ListNotes";
pub const CREATE_NOTE_OPERATION: &str = "CreateNote";
pub const DELETE_NOTE_OPERATION: &str = "DeleteNote";

pub const LIST_NOTES: &str = r"query ListNotes {
  listNotes {
    items {
      id
      title
    }
    nextToken
  }
}";

pub const CREATE_NOTE: &str = r"mutation CreateNote($input: CreateNoteInput!) {
  createNote(input: $input) {
    id
    title
  }
}";

pub const DELETE_NOTE: &str = r"mutation DeleteNote($input: DeleteNoteInput!) {
  deleteNote(input: $input) {
    id
    title
  }
}";
