//! Application module - LivrariaApp and related functionality.
//!
//! Submodules:
//! - `events` - event handling (handle_events)
//! - `run` - eframe::App implementation (per-frame update, persistence)

mod events;
mod run;

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::core::catalog::CatalogService;
use crate::core::event_bus::EventBus;
use crate::dialogs::prefs::AppSettings;
use crate::entities::{Book, BookDraft, SortState};
use crate::widgets::toasts::Toasts;

/// Which dialog is on screen. One value instead of independent flags, so at
/// most one dialog can ever be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveDialog {
    #[default]
    None,
    Details,
    Add,
    Edit,
}

/// Main application state.
///
/// Owns the fetched collection, the form draft, dialog and sort state, and
/// the catalog service doing the actual network work.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct LivrariaApp {
    /// The collection as of the last applied reload.
    #[serde(skip)]
    pub books: Vec<Book>,
    /// Form-bound record for the open add/edit dialog.
    #[serde(skip)]
    pub draft: BookDraft,
    /// Row the details dialog is showing.
    #[serde(skip)]
    pub selected: Option<Book>,
    #[serde(skip)]
    pub dialog: ActiveDialog,
    /// Persisted sort preference, re-applied after every reload.
    pub sort: SortState,
    pub settings: AppSettings,
    #[serde(skip)]
    pub show_settings: bool,
    #[serde(skip)]
    pub toasts: Toasts,
    /// Global event bus; widgets and workers emit, update() polls.
    #[serde(skip)]
    pub event_bus: EventBus,
    /// Network half of the controller (lazy-started on the first frame).
    #[serde(skip)]
    pub catalog: Option<CatalogService>,
    /// Reload generation counter, shared with every catalog service so it
    /// stays monotonic across backend-URL changes.
    #[serde(skip)]
    pub reload_generation: Arc<AtomicU64>,
    /// Backend URL of the last service construction attempt; guards against
    /// retrying a failed construction every frame.
    #[serde(skip)]
    last_attempted_url: Option<String>,
}

impl Default for LivrariaApp {
    fn default() -> Self {
        Self {
            books: Vec::new(),
            draft: BookDraft::default(),
            selected: None,
            dialog: ActiveDialog::None,
            sort: SortState::default(),
            settings: AppSettings::default(),
            show_settings: false,
            toasts: Toasts::default(),
            event_bus: EventBus::new(),
            catalog: None,
            reload_generation: Arc::new(AtomicU64::new(0)),
            last_attempted_url: None,
        }
    }
}

impl LivrariaApp {
    /// Restore persisted state and apply the CLI backend override.
    pub fn new(cc: &eframe::CreationContext<'_>, server_override: Option<String>) -> Self {
        // Cover images are plain URLs; the http + image loaders fetch and
        // decode them on demand.
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let mut app: LivrariaApp = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        if let Some(url) = server_override {
            app.settings.server_url = url;
        }

        app
    }

    /// Lazy-start the catalog service and fire the initial load.
    ///
    /// Called every frame; does nothing once the service exists. A failed
    /// construction is not retried until the backend URL changes.
    pub(crate) fn ensure_catalog(&mut self) {
        if self.catalog.is_some() {
            return;
        }
        let url = self.settings.server_url.clone();
        if self.last_attempted_url.as_deref() == Some(url.as_str()) {
            return;
        }
        self.last_attempted_url = Some(url.clone());

        match CatalogService::new(
            &url,
            self.event_bus.emitter(),
            Arc::clone(&self.reload_generation),
        ) {
            Ok(service) => {
                info!("Catalog service ready: {}", service.base_url());
                service.reload();
                self.catalog = Some(service);
            }
            Err(err) => {
                error!("Failed to initialize catalog service: {err:#}");
                self.toasts
                    .error("Erro ao conectar ao servidor. Verifique as configurações.");
            }
        }
    }

    /// Rebuild the service when the settings dialog changed the backend URL.
    /// Applied only while the dialog is closed, so typing doesn't churn
    /// half-finished URLs.
    pub(crate) fn apply_server_url_if_changed(&mut self) {
        if self.show_settings {
            return;
        }
        let Some(catalog) = &self.catalog else {
            return;
        };
        let desired = self.settings.server_url.trim_end_matches('/');
        if desired.is_empty() || catalog.base_url() == desired {
            return;
        }

        info!("Backend URL changed to {}", desired);
        self.catalog = None;
        self.last_attempted_url = None;
        self.ensure_catalog();
    }
}
