//! Events flowing between the UI, the event handlers, and the catalog
//! service workers.
//!
//! UI intents are emitted by widgets and dialogs; results are emitted by
//! worker threads when a request finishes. All of them are drained by
//! `LivrariaApp::handle_events` once per frame.

use crate::entities::{Book, BookDraft, SortKey};

// === Worker results ===

/// Full collection fetched.
///
/// `generation` identifies the reload that produced this list; handlers drop
/// lists older than the latest requested reload.
#[derive(Debug, Clone)]
pub struct BooksLoadedEvent {
    pub generation: u64,
    pub books: Vec<Book>,
}

/// Create request succeeded.
#[derive(Debug, Clone)]
pub struct BookCreatedEvent;

/// Update request succeeded.
#[derive(Debug, Clone)]
pub struct BookUpdatedEvent {
    pub id: u64,
}

/// Delete request succeeded.
#[derive(Debug, Clone)]
pub struct BookDeletedEvent {
    pub id: u64,
}

/// Which catalog operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogAction {
    Load,
    Create,
    Update,
    Delete,
}

/// A request failed; `message` is the user-facing toast text.
#[derive(Debug, Clone)]
pub struct CatalogFailedEvent {
    pub action: CatalogAction,
    pub message: String,
}

// === UI intents ===

/// Open the details dialog for a row.
#[derive(Debug, Clone)]
pub struct ShowDetailsEvent(pub Book);

/// Open the add dialog with a blank draft.
#[derive(Debug, Clone)]
pub struct ShowAddEvent;

/// Open the edit dialog pre-populated from the selected book.
#[derive(Debug, Clone)]
pub struct ShowEditEvent;

/// A column header was clicked.
#[derive(Debug, Clone)]
pub struct SortRequestedEvent(pub SortKey);

/// Submit the add form.
#[derive(Debug, Clone)]
pub struct SubmitCreateEvent(pub BookDraft);

/// Submit the edit form.
#[derive(Debug, Clone)]
pub struct SubmitUpdateEvent(pub BookDraft);

/// Row delete button (no confirmation step).
#[derive(Debug, Clone)]
pub struct DeleteRequestedEvent(pub u64);

/// Re-fetch the collection (settings change, manual refresh).
#[derive(Debug, Clone)]
pub struct ReloadRequestedEvent;
