//! Event handling for LivrariaApp.
//!
//! Drains the bus once per frame and applies the catalog operations:
//! load / create / update / delete results from the workers, plus the UI
//! intents emitted by the table and dialogs.

use super::{ActiveDialog, LivrariaApp};
use crate::core::catalog_events::{
    BookCreatedEvent, BookDeletedEvent, BookUpdatedEvent, BooksLoadedEvent, CatalogFailedEvent,
    DeleteRequestedEvent, ReloadRequestedEvent, ShowAddEvent, ShowDetailsEvent, ShowEditEvent,
    SortRequestedEvent, SubmitCreateEvent, SubmitUpdateEvent,
};
use crate::core::event_bus::downcast_event;
use crate::entities::{BookDraft, sort_books};

use log::{info, trace, warn};

impl LivrariaApp {
    /// Handle events from the event bus.
    pub fn handle_events(&mut self) {
        for event in self.event_bus.poll() {
            // === Worker results ===
            if let Some(e) = downcast_event::<BooksLoadedEvent>(&event) {
                let latest = self
                    .catalog
                    .as_ref()
                    .map_or(e.generation, |c| c.latest_generation());
                if e.generation < latest {
                    trace!(
                        "Discarding stale book list (generation {} < {})",
                        e.generation, latest
                    );
                    continue;
                }
                info!("Loaded {} books (generation {})", e.books.len(), e.generation);
                self.books = e.books.clone();
                if let Some(key) = self.sort.key {
                    sort_books(&mut self.books, key, self.sort.ascending);
                }
                continue;
            }
            if downcast_event::<BookCreatedEvent>(&event).is_some() {
                self.dialog = ActiveDialog::None;
                self.draft.clear();
                self.toasts.success("Livro adicionado com sucesso!");
                self.request_reload();
                continue;
            }
            if let Some(e) = downcast_event::<BookUpdatedEvent>(&event) {
                trace!("Book {} updated", e.id);
                self.dialog = ActiveDialog::None;
                self.selected = None;
                self.toasts.success("Livro editado com sucesso!");
                self.request_reload();
                continue;
            }
            if let Some(e) = downcast_event::<BookDeletedEvent>(&event) {
                trace!("Book {} deleted", e.id);
                self.toasts.success("Livro removido com sucesso!");
                self.request_reload();
                continue;
            }
            if let Some(e) = downcast_event::<CatalogFailedEvent>(&event) {
                // Worker already logged the cause; the dialog (if any) stays
                // open with the draft intact.
                warn!("Catalog action {:?} failed", e.action);
                self.toasts.error(e.message.clone());
                continue;
            }

            // === UI intents ===
            if let Some(e) = downcast_event::<ShowDetailsEvent>(&event) {
                self.selected = Some(e.0.clone());
                self.dialog = ActiveDialog::Details;
                continue;
            }
            if downcast_event::<ShowAddEvent>(&event).is_some() {
                self.draft.clear();
                self.dialog = ActiveDialog::Add;
                continue;
            }
            if downcast_event::<ShowEditEvent>(&event).is_some() {
                if let Some(book) = &self.selected {
                    self.draft = BookDraft::from_book(book);
                    self.dialog = ActiveDialog::Edit;
                }
                continue;
            }
            if let Some(e) = downcast_event::<SortRequestedEvent>(&event) {
                self.sort.toggle(e.0);
                if let Some(key) = self.sort.key {
                    sort_books(&mut self.books, key, self.sort.ascending);
                }
                continue;
            }
            if let Some(e) = downcast_event::<SubmitCreateEvent>(&event) {
                if let Some(catalog) = &self.catalog {
                    catalog.create(e.0.clone());
                }
                continue;
            }
            if let Some(e) = downcast_event::<SubmitUpdateEvent>(&event) {
                if let Some(catalog) = &self.catalog {
                    catalog.update(e.0.clone());
                }
                continue;
            }
            if let Some(e) = downcast_event::<DeleteRequestedEvent>(&event) {
                if let Some(catalog) = &self.catalog {
                    catalog.delete(e.0);
                }
                continue;
            }
            if downcast_event::<ReloadRequestedEvent>(&event).is_some() {
                self.request_reload();
                continue;
            }
        }
    }

    fn request_reload(&self) {
        if let Some(catalog) = &self.catalog {
            catalog.reload();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CatalogService;
    use crate::entities::{Book, SortKey};
    use std::sync::{Arc, Mutex};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{Duration, Instant};

    fn book(id: u64, title: &str, authors: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            authors: authors.to_string(),
            release_year: String::new(),
            genre: String::new(),
            synopsis: String::new(),
            rating: 0.0,
            price: 0.0,
            cover_url: String::new(),
        }
    }

    #[test]
    fn loaded_books_replace_the_collection() {
        let mut app = LivrariaApp::default();
        app.event_bus.emit(BooksLoadedEvent {
            generation: 1,
            books: vec![book(1, "A", "x"), book(2, "B", "y")],
        });

        app.handle_events();
        assert_eq!(app.books.len(), 2);
    }

    #[test]
    fn stale_book_lists_are_discarded() {
        let mut app = LivrariaApp::default();
        app.books = vec![book(9, "kept", "z")];

        // A service whose latest reload is generation 5.
        let generation = Arc::new(AtomicU64::new(5));
        app.catalog = Some(
            CatalogService::new(
                "http://127.0.0.1:9",
                app.event_bus.emitter(),
                Arc::clone(&generation),
            )
            .unwrap(),
        );

        app.event_bus.emit(BooksLoadedEvent {
            generation: 1,
            books: vec![book(1, "stale", "x")],
        });
        app.handle_events();

        assert_eq!(app.books.len(), 1);
        assert_eq!(app.books[0].title, "kept");
        assert_eq!(generation.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn loaded_books_keep_the_active_sort() {
        let mut app = LivrariaApp::default();
        app.sort.toggle(SortKey::Authors);

        app.event_bus.emit(BooksLoadedEvent {
            generation: 1,
            books: vec![book(1, "B", "Silva"), book(2, "A", "Abreu")],
        });
        app.handle_events();

        assert_eq!(app.books[0].authors, "Abreu");
        assert_eq!(app.books[1].authors, "Silva");
    }

    #[test]
    fn show_add_opens_with_a_blank_draft() {
        let mut app = LivrariaApp::default();
        app.draft.title = "leftover".to_string();

        app.event_bus.emit(ShowAddEvent);
        app.handle_events();

        assert_eq!(app.dialog, ActiveDialog::Add);
        assert_eq!(app.draft, BookDraft::default());
    }

    #[test]
    fn show_edit_prepopulates_from_the_selected_book() {
        let mut app = LivrariaApp::default();
        let selected = book(7, "Dom Casmurro", "Machado de Assis");
        app.event_bus.emit(ShowDetailsEvent(selected.clone()));
        app.handle_events();
        assert_eq!(app.dialog, ActiveDialog::Details);

        app.event_bus.emit(ShowEditEvent);
        app.handle_events();

        assert_eq!(app.dialog, ActiveDialog::Edit);
        assert_eq!(app.draft.id, "7");
        assert_eq!(app.draft.title, "Dom Casmurro");
        assert_eq!(app.draft.authors, "Machado de Assis");
    }

    #[test]
    fn create_success_closes_dialog_clears_draft_and_toasts() {
        let mut app = LivrariaApp::default();
        app.dialog = ActiveDialog::Add;
        app.draft.title = "X".to_string();

        app.event_bus.emit(BookCreatedEvent);
        app.handle_events();

        assert_eq!(app.dialog, ActiveDialog::None);
        assert_eq!(app.draft, BookDraft::default());
        assert_eq!(app.toasts.len(), 1);
    }

    #[test]
    fn failure_keeps_dialog_open_and_draft_intact() {
        let mut app = LivrariaApp::default();
        app.dialog = ActiveDialog::Add;
        app.draft.title = "X".to_string();

        app.event_bus.emit(CatalogFailedEvent {
            action: crate::core::catalog_events::CatalogAction::Create,
            message: "erro".to_string(),
        });
        app.handle_events();

        assert_eq!(app.dialog, ActiveDialog::Add);
        assert_eq!(app.draft.title, "X");
        assert_eq!(app.toasts.len(), 1);
    }

    #[test]
    fn sort_request_toggles_and_reorders() {
        let mut app = LivrariaApp::default();
        app.books = vec![book(2, "B", "y"), book(1, "A", "x")];

        app.event_bus.emit(SortRequestedEvent(SortKey::Id));
        app.handle_events();
        assert_eq!(app.books[0].id, 1);
        assert!(app.sort.ascending);

        app.event_bus.emit(SortRequestedEvent(SortKey::Id));
        app.handle_events();
        assert_eq!(app.books[0].id, 2);
        assert!(!app.sort.ascending);
    }

    #[test]
    fn title_header_sorts_by_title() {
        let mut app = LivrariaApp::default();
        app.books = vec![book(1, "Zadig", "x"), book(2, "Alienista", "y")];

        app.event_bus.emit(SortRequestedEvent(SortKey::Title));
        app.handle_events();

        assert_eq!(app.books[0].title, "Alienista");
    }

    // === End-to-end flows against a stateful in-process backend ===

    fn wire_book(id: &str, title: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "titulo": title,
            "autores": "",
            "ano_lancamento": "",
            "genero": "",
            "sinopse": "",
            "avaliacao": "",
            "preco": "",
            "imagem_capa": ""
        })
    }

    /// Mock backend holding a mutable collection; records "METHOD url" lines.
    fn spawn_stateful_backend(
        initial: Vec<serde_json::Value>,
    ) -> (String, Arc<Mutex<Vec<String>>>) {
        let books = Arc::new(Mutex::new(initial));
        let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let books_handle = Arc::clone(&books);
        let log_handle = Arc::clone(&log);

        let server = rouille::Server::new("127.0.0.1:0", move |request| {
            let method = request.method().to_string();
            let url = request.url();
            log_handle.lock().unwrap().push(format!("{} {}", method, url));

            let mut books = books_handle.lock().unwrap();
            if method == "GET" && url == "/livros" {
                return rouille::Response::from_data(
                    "application/json",
                    serde_json::to_vec(&*books).unwrap(),
                );
            }
            if method == "POST" && url == "/livros" {
                let mut body = String::new();
                if let Some(mut data) = request.data() {
                    use std::io::Read;
                    let _ = data.read_to_string(&mut body);
                }
                let mut value: serde_json::Value = serde_json::from_str(&body).unwrap();
                value["id"] = serde_json::Value::String((books.len() + 1).to_string());
                books.push(value);
                return rouille::Response::text("");
            }
            if method == "DELETE" {
                let id = url.rsplit('/').next().unwrap_or_default().to_string();
                books.retain(|b| b["id"] != serde_json::Value::String(id.clone()));
                return rouille::Response::text("");
            }
            rouille::Response::text("")
        })
        .expect("failed to bind mock server");

        let base_url = format!("http://{}", server.server_addr());
        std::thread::spawn(move || server.run());
        (base_url, log)
    }

    fn app_with_backend(base_url: &str) -> LivrariaApp {
        let mut app = LivrariaApp::default();
        app.catalog = Some(
            CatalogService::new(
                base_url,
                app.event_bus.emitter(),
                Arc::clone(&app.reload_generation),
            )
            .unwrap(),
        );
        app
    }

    /// Keep draining events until `done` or 5s pass (worker results arrive
    /// asynchronously).
    fn pump_until(app: &mut LivrariaApp, mut done: impl FnMut(&LivrariaApp) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            app.handle_events();
            if done(app) {
                return;
            }
            assert!(Instant::now() < deadline, "timed out waiting for app state");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn create_flow_posts_once_reloads_and_toasts() {
        let (base_url, log) = spawn_stateful_backend(Vec::new());
        let mut app = app_with_backend(&base_url);
        app.dialog = ActiveDialog::Add;
        app.draft.title = "X".to_string();

        app.event_bus.emit(SubmitCreateEvent(app.draft.clone()));
        pump_until(&mut app, |app| {
            !app.books.is_empty() && app.dialog == ActiveDialog::None
        });

        assert_eq!(app.books[0].title, "X");
        assert_eq!(app.draft, BookDraft::default());
        assert!(!app.toasts.is_empty());

        let log = log.lock().unwrap();
        let posts = log.iter().filter(|l| l.starts_with("POST")).count();
        assert_eq!(posts, 1);
    }

    #[test]
    fn delete_flow_removes_the_record_after_reload() {
        let (base_url, log) = spawn_stateful_backend(vec![wire_book("42", "Doomed")]);
        let mut app = app_with_backend(&base_url);

        app.catalog.as_ref().unwrap().reload();
        pump_until(&mut app, |app| !app.books.is_empty());
        assert_eq!(app.books[0].id, 42);

        app.event_bus.emit(DeleteRequestedEvent(42));
        pump_until(&mut app, |app| app.books.is_empty());

        let log = log.lock().unwrap();
        assert!(log.iter().any(|l| l == "DELETE /livros/42"));
    }
}
