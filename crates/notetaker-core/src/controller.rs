//! Note list controller.
//!
//! Keeps a local `NoteListState` in step with a remote `NoteStore`. Remote
//! operations run one at a time through a mutation gate, and each result is
//! applied to the state as it is when the response arrives. Failures never
//! escape: state stays at its last confirmed value and the caller gets an
//! `Outcome` it may render or ignore.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::{Note, NoteId};
use crate::remote::{CreateNoteInput, DeleteNoteInput, NoteStore};
use crate::state::{NoteListState, Transition};

/// Result of one controller operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The server confirmed the operation and local state was updated.
    Applied,
    /// The server answered without a usable result; state is unchanged.
    NoData,
    /// The request failed (transport, auth, or undecodable payload); state is unchanged.
    Failed,
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl From<Transition> for Outcome {
    fn from(value: Transition) -> Self {
        match value {
            Transition::Applied => Self::Applied,
            Transition::Unchanged => Self::NoData,
        }
    }
}

/// Owns the local note list and mirrors server-confirmed changes into it.
pub struct NoteListController<S: NoteStore> {
    store: S,
    state: Arc<Mutex<NoteListState>>,
    mutation_gate: Arc<Mutex<()>>,
}

impl<S: NoteStore> NoteListController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(NoteListState::new())),
            mutation_gate: Arc::new(Mutex::new(())),
        }
    }

    #[cfg(test)]
    const fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the full remote listing and replace local notes with it.
    pub async fn initialize(&self) -> Outcome {
        let _gate = self.mutation_gate.lock().await;

        let items = match self.store.list_notes().await {
            Ok(response) => response.into_items(),
            Err(error) => {
                tracing::warn!("Failed to fetch notes: {}", error);
                return Outcome::Failed;
            }
        };

        let mut state = self.state.lock().await;
        let outcome = Outcome::from(state.apply_fetch_result(items));
        if outcome.is_applied() {
            tracing::info!("Loaded {} notes", state.notes.len());
        } else {
            tracing::warn!("Note listing response carried no items");
        }
        outcome
    }

    /// Replace the draft title. Never touches the remote store.
    pub async fn update_draft(&self, value: impl Into<String>) {
        self.state.lock().await.update_draft(value);
    }

    /// Send the current draft as a new note.
    ///
    /// On success the created note is appended and the draft cleared; otherwise
    /// the draft is left in place for another attempt.
    pub async fn submit_draft(&self) -> Outcome {
        self.submit_draft_with_note().await.0
    }

    /// Same as [`Self::submit_draft`], also returning the note the server
    /// created when the result was applied.
    ///
    /// The draft is read when this is called, before waiting behind other
    /// remote operations.
    pub async fn submit_draft_with_note(&self) -> (Outcome, Option<Note>) {
        let title = self.state.lock().await.draft_title.clone();
        let _gate = self.mutation_gate.lock().await;

        let created = match self.store.create_note(CreateNoteInput { title }).await {
            Ok(response) => response.into_created(),
            Err(error) => {
                tracing::warn!("Failed to create note: {}", error);
                return (Outcome::Failed, None);
            }
        };

        if let Some(note) = created.as_ref() {
            tracing::debug!(note_id = %note.id, "Note created");
        }
        let outcome = Outcome::from(
            self.state
                .lock()
                .await
                .apply_create_result(created.clone()),
        );
        if outcome.is_applied() {
            (outcome, created)
        } else {
            tracing::warn!("Create response carried no usable note; keeping draft");
            (outcome, None)
        }
    }

    /// Ask the remote store to delete `id`.
    ///
    /// The local entry removed is the one matching the id the server reports
    /// as deleted, which is expected to equal `id`.
    pub async fn delete_note(&self, id: &NoteId) -> Outcome {
        let _gate = self.mutation_gate.lock().await;

        let input = DeleteNoteInput { id: id.clone() };
        let deleted = match self.store.delete_note(input).await {
            Ok(response) => response.into_deleted(),
            Err(error) => {
                tracing::warn!(note_id = %id, "Failed to delete note: {}", error);
                return Outcome::Failed;
            }
        };

        if let Some(note) = deleted.as_ref().filter(|note| &note.id != id) {
            tracing::warn!(
                requested = %id,
                returned = %note.id,
                "Delete response echoed a different note id"
            );
        }
        let outcome = Outcome::from(self.state.lock().await.apply_delete_result(deleted));
        if !outcome.is_applied() {
            tracing::warn!(note_id = %id, "Delete response carried no note");
        }
        outcome
    }

    /// Current notes in display order.
    pub async fn notes(&self) -> Vec<Note> {
        self.state.lock().await.notes.clone()
    }

    /// Current draft title.
    pub async fn draft_title(&self) -> String {
        self.state.lock().await.draft_title.clone()
    }

    /// Copy of the full state for rendering.
    pub async fn snapshot(&self) -> NoteListState {
        self.state.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use crate::remote::{
        CreateNoteResponse, DeleteNoteResponse, ListNotesResponse, RemoteError, RemoteResult,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        List,
        Create(String),
        Delete(String),
    }

    /// Store that replays queued responses and records every request.
    #[derive(Default)]
    struct ScriptedStore {
        lists: StdMutex<VecDeque<RemoteResult<ListNotesResponse>>>,
        creates: StdMutex<VecDeque<RemoteResult<CreateNoteResponse>>>,
        deletes: StdMutex<VecDeque<RemoteResult<DeleteNoteResponse>>>,
        calls: StdMutex<Vec<Call>>,
        delay: Option<Duration>,
    }

    impl ScriptedStore {
        fn push_list(&self, response: RemoteResult<ListNotesResponse>) {
            self.lists.lock().unwrap().push_back(response);
        }

        fn push_create(&self, response: RemoteResult<CreateNoteResponse>) {
            self.creates.lock().unwrap().push_back(response);
        }

        fn push_delete(&self, response: RemoteResult<DeleteNoteResponse>) {
            self.deletes.lock().unwrap().push_back(response);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        async fn pause(&self) {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }
    }

    #[async_trait]
    impl NoteStore for ScriptedStore {
        async fn list_notes(&self) -> RemoteResult<ListNotesResponse> {
            self.calls.lock().unwrap().push(Call::List);
            self.pause().await;
            self.lists
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ListNotesResponse::default()))
        }

        async fn create_note(&self, input: CreateNoteInput) -> RemoteResult<CreateNoteResponse> {
            self.calls.lock().unwrap().push(Call::Create(input.title));
            self.pause().await;
            self.creates
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(CreateNoteResponse::default()))
        }

        async fn delete_note(&self, input: DeleteNoteInput) -> RemoteResult<DeleteNoteResponse> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Delete(input.id.to_string()));
            self.pause().await;
            self.deletes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(DeleteNoteResponse::default()))
        }
    }

    fn note(id: &str, title: &str) -> Note {
        Note::new(id, title)
    }

    async fn seeded(notes: Vec<Note>) -> NoteListController<Arc<ScriptedStore>> {
        let store = Arc::new(ScriptedStore::default());
        store.push_list(Ok(ListNotesResponse::with_items(
            notes.into_iter().map(Some).collect(),
        )));
        let controller = NoteListController::new(store);
        assert_eq!(controller.initialize().await, Outcome::Applied);
        controller
    }

    #[tokio::test]
    async fn initialize_replaces_notes_in_order_without_nulls() {
        let store = Arc::new(ScriptedStore::default());
        store.push_list(Ok(ListNotesResponse::with_items(vec![
            Some(note("a", "A")),
            None,
            Some(note("b", "B")),
            None,
            Some(note("c", "C")),
        ])));
        let controller = NoteListController::new(store.clone());

        assert_eq!(controller.initialize().await, Outcome::Applied);
        assert_eq!(
            controller.notes().await,
            vec![note("a", "A"), note("b", "B"), note("c", "C")]
        );
        assert_eq!(store.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn initialize_without_data_keeps_notes() {
        let controller = seeded(vec![note("1", "A")]).await;
        controller
            .store()
            .push_list(Ok(ListNotesResponse::default()));

        assert_eq!(controller.initialize().await, Outcome::NoData);
        assert_eq!(controller.notes().await, vec![note("1", "A")]);
    }

    #[tokio::test]
    async fn initialize_failure_is_absorbed() {
        let store = Arc::new(ScriptedStore::default());
        store.push_list(Err(RemoteError::Api("Unauthorized (401)".to_string())));
        let controller = NoteListController::new(store);

        assert_eq!(controller.initialize().await, Outcome::Failed);
        assert!(controller.notes().await.is_empty());
    }

    #[tokio::test]
    async fn submit_appends_created_note_and_clears_draft() {
        let controller = seeded(vec![note("a", "A"), note("b", "B")]).await;
        controller
            .store()
            .push_create(Ok(CreateNoteResponse::created(note("c", "C"))));

        controller.update_draft("C").await;
        assert_eq!(controller.submit_draft().await, Outcome::Applied);

        assert_eq!(
            controller.notes().await,
            vec![note("a", "A"), note("b", "B"), note("c", "C")]
        );
        assert_eq!(controller.draft_title().await, "");
        assert_eq!(
            controller.store().calls().last(),
            Some(&Call::Create("C".to_string()))
        );
    }

    #[tokio::test]
    async fn submit_without_created_note_keeps_draft() {
        let controller = seeded(vec![note("a", "A")]).await;
        controller
            .store()
            .push_create(Ok(CreateNoteResponse::default()));

        controller.update_draft("X").await;
        assert_eq!(controller.submit_draft().await, Outcome::NoData);

        assert_eq!(controller.notes().await, vec![note("a", "A")]);
        assert_eq!(controller.draft_title().await, "X");
    }

    #[tokio::test]
    async fn submit_failure_keeps_draft() {
        let controller = seeded(Vec::new()).await;
        controller
            .store()
            .push_create(Err(RemoteError::InvalidPayload("truncated".to_string())));

        controller.update_draft("keep me").await;
        assert_eq!(controller.submit_draft().await, Outcome::Failed);
        assert_eq!(controller.draft_title().await, "keep me");
        assert!(controller.notes().await.is_empty());
    }

    #[tokio::test]
    async fn submit_forwards_empty_draft() {
        let controller = seeded(Vec::new()).await;
        controller
            .store()
            .push_create(Ok(CreateNoteResponse::created(note("e", ""))));

        assert_eq!(controller.submit_draft().await, Outcome::Applied);
        assert_eq!(
            controller.store().calls().last(),
            Some(&Call::Create(String::new()))
        );
        assert_eq!(controller.notes().await, vec![note("e", "")]);
    }

    #[tokio::test]
    async fn delete_removes_note_matching_returned_id() {
        let controller = seeded(vec![note("1", "A"), note("2", "B")]).await;
        controller
            .store()
            .push_delete(Ok(DeleteNoteResponse::deleted(note("2", "B"))));

        assert_eq!(
            controller.delete_note(&NoteId::new("2")).await,
            Outcome::Applied
        );
        assert_eq!(controller.notes().await, vec![note("1", "A")]);
    }

    #[tokio::test]
    async fn delete_trusts_echoed_id() {
        let controller = seeded(vec![note("1", "A"), note("2", "B")]).await;
        controller
            .store()
            .push_delete(Ok(DeleteNoteResponse::deleted(note("1", "A"))));

        assert_eq!(
            controller.delete_note(&NoteId::new("2")).await,
            Outcome::Applied
        );
        assert_eq!(controller.notes().await, vec![note("2", "B")]);
    }

    #[tokio::test]
    async fn delete_without_result_is_noop() {
        let controller = seeded(vec![note("1", "A"), note("2", "B")]).await;
        controller
            .store()
            .push_delete(Ok(DeleteNoteResponse::default()));

        assert_eq!(
            controller.delete_note(&NoteId::new("1")).await,
            Outcome::NoData
        );
        assert_eq!(
            controller.notes().await,
            vec![note("1", "A"), note("2", "B")]
        );
    }

    #[tokio::test]
    async fn update_draft_echoes_without_remote_call() {
        let store = Arc::new(ScriptedStore::default());
        let controller = NoteListController::new(store.clone());

        controller.update_draft("hello").await;

        assert_eq!(controller.draft_title().await, "hello");
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn concurrent_deletes_do_not_lose_updates() {
        let store = Arc::new(ScriptedStore {
            delay: Some(Duration::from_millis(5)),
            ..ScriptedStore::default()
        });
        store.push_list(Ok(ListNotesResponse::with_items(vec![
            Some(note("1", "A")),
            Some(note("2", "B")),
            Some(note("3", "C")),
        ])));
        store.push_delete(Ok(DeleteNoteResponse::deleted(note("1", "A"))));
        store.push_delete(Ok(DeleteNoteResponse::deleted(note("3", "C"))));
        let controller = NoteListController::new(store.clone());
        controller.initialize().await;

        let first = NoteId::new("1");
        let third = NoteId::new("3");
        let (a, b) = tokio::join!(
            controller.delete_note(&first),
            controller.delete_note(&third)
        );

        assert_eq!((a, b), (Outcome::Applied, Outcome::Applied));
        assert_eq!(controller.notes().await, vec![note("2", "B")]);
    }

    #[tokio::test]
    async fn draft_edits_during_pending_create_are_not_blocked() {
        let store = Arc::new(ScriptedStore {
            delay: Some(Duration::from_millis(20)),
            ..ScriptedStore::default()
        });
        store.push_create(Ok(CreateNoteResponse::default()));
        let controller = NoteListController::new(store);
        controller.update_draft("first").await;

        let (outcome, ()) = tokio::join!(controller.submit_draft(), async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            controller.update_draft("second").await;
        });

        assert_eq!(outcome, Outcome::NoData);
        assert_eq!(controller.draft_title().await, "second");
    }

    #[tokio::test]
    async fn queued_submit_sends_draft_from_call_time() {
        let store = Arc::new(ScriptedStore {
            delay: Some(Duration::from_millis(20)),
            ..ScriptedStore::default()
        });
        store.push_create(Ok(CreateNoteResponse::created(note("1", "A"))));
        store.push_create(Ok(CreateNoteResponse::created(note("2", "B"))));
        let controller = NoteListController::new(store.clone());
        controller.update_draft("A").await;

        let (first, second) = tokio::join!(controller.submit_draft(), async {
            tokio::time::sleep(Duration::from_millis(2)).await;
            controller.update_draft("B").await;
            controller.submit_draft().await
        });

        assert_eq!((first, second), (Outcome::Applied, Outcome::Applied));
        assert_eq!(
            store.calls(),
            vec![Call::Create("A".to_string()), Call::Create("B".to_string())]
        );
        assert_eq!(
            controller.notes().await,
            vec![note("1", "A"), note("2", "B")]
        );
        assert_eq!(controller.draft_title().await, "");
    }

    #[tokio::test]
    async fn submit_with_note_returns_created_note() {
        let controller = seeded(vec![note("a", "A")]).await;
        controller
            .store()
            .push_create(Ok(CreateNoteResponse::created(note("b", "B"))));
        controller
            .store()
            .push_create(Ok(CreateNoteResponse::created(note("", "blank"))));

        controller.update_draft("B").await;
        assert_eq!(
            controller.submit_draft_with_note().await,
            (Outcome::Applied, Some(note("b", "B")))
        );

        controller.update_draft("blank").await;
        assert_eq!(
            controller.submit_draft_with_note().await,
            (Outcome::NoData, None)
        );
        assert_eq!(controller.draft_title().await, "blank");
        assert_eq!(controller.notes().await, vec![note("a", "A"), note("b", "B")]);
    }
}
