//! Catalog service - the network half of the book list controller.
//!
//! Each user action becomes one job on the worker pool: the job runs the
//! blocking HTTP request and emits a result event that the main loop picks
//! up on its next frame. Nothing here touches UI state.
//!
//! Reloads are stamped with a monotonically increasing generation. When
//! reloads overlap, only the list belonging to the latest generation may be
//! applied; the handler compares against [`CatalogService::latest_generation`]
//! and drops stale results.

use log::error;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::core::catalog_events::{
    BookCreatedEvent, BookDeletedEvent, BookUpdatedEvent, BooksLoadedEvent, CatalogAction,
    CatalogFailedEvent,
};
use crate::core::client::CatalogClient;
use crate::core::event_bus::EventEmitter;
use crate::core::workers::Workers;
use crate::entities::BookDraft;

/// Worker threads for catalog requests. Two is plenty: one user action, one
/// overlapping reload.
const WORKER_THREADS: usize = 2;

pub struct CatalogService {
    client: Arc<CatalogClient>,
    workers: Workers,
    emitter: EventEmitter,
    generation: Arc<AtomicU64>,
    in_flight: Arc<AtomicUsize>,
}

impl CatalogService {
    /// `generation` is shared with the owner so the counter stays monotonic
    /// even when the service is rebuilt for a new backend URL.
    pub fn new(
        base_url: &str,
        emitter: EventEmitter,
        generation: Arc<AtomicU64>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            client: Arc::new(CatalogClient::new(base_url)?),
            workers: Workers::new(WORKER_THREADS),
            emitter,
            generation,
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// True while any request is running (drives the status-bar spinner and
    /// repaint scheduling).
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Generation of the most recently requested reload.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Fetch the full collection.
    ///
    /// On success emits [`BooksLoadedEvent`] stamped with this reload's
    /// generation; on failure logs and emits [`CatalogFailedEvent`], leaving
    /// the previous collection untouched.
    pub fn reload(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.spawn(move |client, emitter| match client.list_books() {
            Ok(books) => emitter.emit(BooksLoadedEvent { generation, books }),
            Err(err) => {
                error!("Failed to load books: {err:#}");
                emitter.emit(CatalogFailedEvent {
                    action: CatalogAction::Load,
                    message: "Erro ao carregar livros. Tente novamente mais tarde.".to_string(),
                });
            }
        });
    }

    /// Submit a new record. No client-side validation - the draft strings go
    /// out verbatim and the backend decides.
    pub fn create(&self, draft: BookDraft) {
        self.spawn(move |client, emitter| match client.create_book(&draft) {
            Ok(()) => emitter.emit(BookCreatedEvent),
            Err(err) => {
                error!("Failed to create book: {err:#}");
                emitter.emit(CatalogFailedEvent {
                    action: CatalogAction::Create,
                    message: "Erro ao adicionar livro. Verifique os dados e tente novamente."
                        .to_string(),
                });
            }
        });
    }

    /// Submit the full edited record, keyed on the draft's id.
    pub fn update(&self, draft: BookDraft) {
        let Some(id) = draft.parsed_id() else {
            // An edit draft always starts from an existing record; reaching
            // here means the id field was hand-emptied in the form.
            error!("Update submitted without a valid id: {:?}", draft.id);
            self.emitter.emit(CatalogFailedEvent {
                action: CatalogAction::Update,
                message: "Erro ao editar livro. Verifique os dados e tente novamente.".to_string(),
            });
            return;
        };

        self.spawn(move |client, emitter| match client.update_book(id, &draft) {
            Ok(()) => emitter.emit(BookUpdatedEvent { id }),
            Err(err) => {
                error!("Failed to update book {id}: {err:#}");
                emitter.emit(CatalogFailedEvent {
                    action: CatalogAction::Update,
                    message: "Erro ao editar livro. Verifique os dados e tente novamente."
                        .to_string(),
                });
            }
        });
    }

    /// Delete a record. No confirmation step, matching the table UI.
    pub fn delete(&self, id: u64) {
        self.spawn(move |client, emitter| match client.delete_book(id) {
            Ok(()) => emitter.emit(BookDeletedEvent { id }),
            Err(err) => {
                error!("Failed to delete book {id}: {err:#}");
                emitter.emit(CatalogFailedEvent {
                    action: CatalogAction::Delete,
                    message: "Erro ao excluir livro. Tente novamente mais tarde.".to_string(),
                });
            }
        });
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(&CatalogClient, &EventEmitter) + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let emitter = self.emitter.clone();
        let in_flight = Arc::clone(&self.in_flight);

        in_flight.fetch_add(1, Ordering::SeqCst);
        self.workers.execute(move || {
            job(&client, &emitter);
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::{EventBus, downcast_event};
    use std::time::{Duration, Instant};

    /// Poll the bus until `pred` finds a matching event or 5s pass.
    fn wait_for_event<E, F, T>(bus: &EventBus, mut pred: F) -> T
    where
        E: crate::core::event_bus::Event,
        F: FnMut(&E) -> Option<T>,
    {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            for event in bus.poll() {
                if let Some(e) = downcast_event::<E>(&event)
                    && let Some(out) = pred(e)
                {
                    return out;
                }
            }
            assert!(Instant::now() < deadline, "timed out waiting for event");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    fn spawn_backend(status: u16) -> String {
        let server = rouille::Server::new("127.0.0.1:0", move |request| {
            if status != 200 {
                return rouille::Response::text("boom").with_status_code(status);
            }
            if request.method() == "GET" {
                let body = r#"[{"id":"1","titulo":"A","autores":"Silva",
                    "ano_lancamento":"","genero":"","sinopse":"",
                    "avaliacao":"3","preco":"10","imagem_capa":""}]"#;
                rouille::Response::from_data("application/json", body.as_bytes().to_vec())
            } else {
                rouille::Response::text("")
            }
        })
        .expect("failed to bind mock server");
        let base_url = format!("http://{}", server.server_addr());
        std::thread::spawn(move || server.run());
        base_url
    }

    #[test]
    fn reload_emits_generation_stamped_list() {
        let bus = EventBus::new();
        let service = CatalogService::new(
            &spawn_backend(200),
            bus.emitter(),
            Arc::new(AtomicU64::new(0)),
        )
        .unwrap();

        service.reload();
        assert_eq!(service.latest_generation(), 1);

        let (generation, len) =
            wait_for_event::<BooksLoadedEvent, _, _>(&bus, |e| Some((e.generation, e.books.len())));
        assert_eq!(generation, 1);
        assert_eq!(len, 1);
    }

    #[test]
    fn overlapping_reloads_bump_the_generation() {
        let bus = EventBus::new();
        let service = CatalogService::new(
            &spawn_backend(200),
            bus.emitter(),
            Arc::new(AtomicU64::new(0)),
        )
        .unwrap();

        service.reload();
        service.reload();
        assert_eq!(service.latest_generation(), 2);

        // The generation-2 list arrives and matches latest; a generation-1
        // list would be stale by the handler's check.
        wait_for_event::<BooksLoadedEvent, _, _>(&bus, |e| {
            (e.generation == service.latest_generation()).then_some(())
        });
    }

    #[test]
    fn create_failure_emits_error_event_with_action() {
        let bus = EventBus::new();
        let service = CatalogService::new(
            &spawn_backend(500),
            bus.emitter(),
            Arc::new(AtomicU64::new(0)),
        )
        .unwrap();

        service.create(BookDraft::default());

        let action = wait_for_event::<CatalogFailedEvent, _, _>(&bus, |e| Some(e.action));
        assert_eq!(action, CatalogAction::Create);
    }

    #[test]
    fn delete_success_emits_deleted_event() {
        let bus = EventBus::new();
        let service = CatalogService::new(
            &spawn_backend(200),
            bus.emitter(),
            Arc::new(AtomicU64::new(0)),
        )
        .unwrap();

        service.delete(42);

        let id = wait_for_event::<BookDeletedEvent, _, _>(&bus, |e| Some(e.id));
        assert_eq!(id, 42);
    }

    #[test]
    fn update_without_id_fails_fast() {
        let bus = EventBus::new();
        let service = CatalogService::new(
            &spawn_backend(200),
            bus.emitter(),
            Arc::new(AtomicU64::new(0)),
        )
        .unwrap();

        service.update(BookDraft::default());

        let action = wait_for_event::<CatalogFailedEvent, _, _>(&bus, |e| Some(e.action));
        assert_eq!(action, CatalogAction::Update);
    }
}
