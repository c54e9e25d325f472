//! Notes query/CRUD controller.
//!
//! Maintains the note list, the query state that drives the server-side
//! list endpoint, and per-mutation in-flight flags the view uses to
//! disable duplicate submissions. The server is the source of truth for
//! filtering and sorting; the controller never re-derives order locally.

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::wire::NoteListResponse;
use ink_core::validate::validate_note;
use ink_core::{Note, NoteDraft, NoteQuery, SortField, SortOrder};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Resets an in-flight flag when the operation ends, whichever way it ends.
struct FlagGuard<'a>(&'a AtomicBool);

impl<'a> FlagGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Point-in-time copy of the controller state for the view.
#[derive(Debug, Clone)]
pub struct NotesSnapshot {
    pub notes: Vec<Note>,
    pub total_count: u64,
    pub current: Option<Note>,
    pub query: NoteQuery,
}

#[derive(Debug)]
struct NotesState {
    notes: Vec<Note>,
    total_count: u64,
    current: Option<Note>,
    query: NoteQuery,
}

pub struct NotesController {
    api: Arc<ApiClient>,
    state: RwLock<NotesState>,
    loading: AtomicBool,
    creating: AtomicBool,
    updating: AtomicBool,
    deleting: AtomicBool,
}

impl NotesController {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self::with_query(api, NoteQuery::default())
    }

    pub fn with_query(api: Arc<ApiClient>, query: NoteQuery) -> Self {
        Self {
            api,
            state: RwLock::new(NotesState {
                notes: Vec::new(),
                total_count: 0,
                current: None,
                query,
            }),
            loading: AtomicBool::new(false),
            creating: AtomicBool::new(false),
            updating: AtomicBool::new(false),
            deleting: AtomicBool::new(false),
        }
    }

    pub async fn snapshot(&self) -> NotesSnapshot {
        let state = self.state.read().await;
        NotesSnapshot {
            notes: state.notes.clone(),
            total_count: state.total_count,
            current: state.current.clone(),
            query: state.query.clone(),
        }
    }

    pub async fn notes(&self) -> Vec<Note> {
        self.state.read().await.notes.clone()
    }

    pub async fn current(&self) -> Option<Note> {
        self.state.read().await.current.clone()
    }

    pub async fn total_count(&self) -> u64 {
        self.state.read().await.total_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn is_creating(&self) -> bool {
        self.creating.load(Ordering::SeqCst)
    }

    pub fn is_updating(&self) -> bool {
        self.updating.load(Ordering::SeqCst)
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting.load(Ordering::SeqCst)
    }

    /// Fetch the list with the current query. On failure the cached list
    /// is left unchanged.
    pub async fn reload(&self) -> ApiResult<Vec<Note>> {
        let params = self.state.read().await.query.to_params();
        let _guard = FlagGuard::raise(&self.loading);
        let response: NoteListResponse = self.api.get("/notes/", &params).await?;
        let (notes, total_count) = response.into_parts();

        let mut state = self.state.write().await;
        state.notes = notes.clone();
        state.total_count = total_count;
        Ok(notes)
    }

    pub async fn set_search(&self, search: Option<String>) -> ApiResult<Vec<Note>> {
        self.mutate_query(|query| query.search = search).await
    }

    pub async fn set_tag_filter(&self, tag: Option<String>) -> ApiResult<Vec<Note>> {
        self.mutate_query(|query| query.tag = tag).await
    }

    pub async fn set_author_filter(&self, author_id: Option<i64>) -> ApiResult<Vec<Note>> {
        self.mutate_query(|query| query.author_id = author_id).await
    }

    pub async fn set_sort(&self, field: SortField, order: SortOrder) -> ApiResult<Vec<Note>> {
        self.mutate_query(|query| {
            query.sort_field = field;
            query.sort_order = order;
        })
        .await
    }

    pub async fn set_page(&self, page: u32) -> ApiResult<Vec<Note>> {
        self.mutate_query(|query| query.page = page.max(1)).await
    }

    pub async fn set_page_size(&self, page_size: u32) -> ApiResult<Vec<Note>> {
        self.mutate_query(|query| query.page_size = page_size).await
    }

    /// Clear search and filters and return to the first page, keeping the
    /// sort setting.
    pub async fn reset_filters(&self) -> ApiResult<Vec<Note>> {
        self.mutate_query(|query| {
            query.search = None;
            query.tag = None;
            query.author_id = None;
            query.page = 1;
        })
        .await
    }

    async fn mutate_query(&self, apply: impl FnOnce(&mut NoteQuery)) -> ApiResult<Vec<Note>> {
        {
            let mut state = self.state.write().await;
            apply(&mut state.query);
        }
        self.reload().await
    }

    /// Create a note. Client-side validation failures surface before any
    /// network call; on success the returned note joins the cached list.
    pub async fn create(&self, draft: &NoteDraft) -> ApiResult<Note> {
        validate_note(draft).map_err(ApiError::Validation)?;

        let note: Note = {
            let _guard = FlagGuard::raise(&self.creating);
            self.api.post("/notes/", draft).await?
        };

        let mut state = self.state.write().await;
        state.notes.push(note.clone());
        state.total_count += 1;
        tracing::debug!(id = note.id, "Created note");
        Ok(note)
    }

    /// Full replace of title/content. The returned note replaces the list
    /// entry and becomes the current note.
    pub async fn update(&self, id: i64, draft: &NoteDraft) -> ApiResult<Note> {
        validate_note(draft).map_err(ApiError::Validation)?;

        let note: Note = {
            let _guard = FlagGuard::raise(&self.updating);
            self.api.put(&format!("/notes/{id}/"), draft).await?
        };

        let mut state = self.state.write().await;
        if let Some(entry) = state.notes.iter_mut().find(|n| n.id == id) {
            *entry = note.clone();
        }
        state.current = Some(note.clone());
        tracing::debug!(id, "Updated note");
        Ok(note)
    }

    /// Delete a note; drops it from the cached list and clears the current
    /// note if it was the one being viewed.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        {
            let _guard = FlagGuard::raise(&self.deleting);
            self.api.delete(&format!("/notes/{id}/")).await?;
        }

        let mut state = self.state.write().await;
        state.notes.retain(|note| note.id != id);
        state.total_count = state.total_count.saturating_sub(1);
        if state.current.as_ref().is_some_and(|note| note.id == id) {
            state.current = None;
        }
        tracing::debug!(id, "Deleted note");
        Ok(())
    }

    /// Fetch a single note and make it the current note.
    pub async fn get(&self, id: i64) -> ApiResult<Note> {
        let note: Note = self.api.get(&format!("/notes/{id}/"), &[]).await?;
        let mut state = self.state.write().await;
        state.current = Some(note.clone());
        Ok(note)
    }
}
