//! Main application loop - eframe::App implementation.
//!
//! Per-frame flow:
//! 1. Lazy-start the catalog service (fires the initial load)
//! 2. Drain and handle events
//! 3. Apply settings (backend URL, theme, font)
//! 4. Render panels: header, status bar, book table
//! 5. Render the active dialog and the settings window
//! 6. Render toasts; keep repainting while requests are in flight

use std::time::Duration;

use eframe::egui;
use log::trace;

use crate::app::{ActiveDialog, LivrariaApp};
use crate::dialogs::book_form::{self, FormMode};
use crate::dialogs::details;
use crate::dialogs::prefs::render_settings_window;
use crate::widgets::{book_table, header, status};

impl eframe::App for LivrariaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_catalog();
        self.handle_events();
        self.apply_server_url_if_changed();

        // Apply theme based on settings
        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Apply font size from settings
        let mut style = (*ctx.style()).clone();
        for (_, font_id) in style.text_styles.iter_mut() {
            font_id.size = self.settings.font_size;
        }
        ctx.set_style(style);

        header::show(ctx, &mut self.show_settings);

        let emitter = self.event_bus.emitter();

        let busy = self.catalog.as_ref().is_some_and(|c| c.is_busy());
        let base_url = self
            .catalog
            .as_ref()
            .map(|c| c.base_url().to_string())
            .unwrap_or_else(|| self.settings.server_url.clone());
        status::show(ctx, &base_url, self.books.len(), busy, &emitter);

        egui::CentralPanel::default().show(ctx, |ui| {
            // The table scrolls itself; no outer scroll area.
            book_table::show(ui, &self.books, &self.sort, &emitter);
        });

        match self.dialog {
            ActiveDialog::None => {}
            ActiveDialog::Details => {
                let stay_open = match &self.selected {
                    Some(book) => details::show(ctx, book, &emitter),
                    None => false,
                };
                if !stay_open {
                    self.dialog = ActiveDialog::None;
                    self.selected = None;
                }
            }
            ActiveDialog::Add => {
                if !book_form::show(ctx, FormMode::Add, &mut self.draft, &emitter) {
                    self.dialog = ActiveDialog::None;
                }
            }
            ActiveDialog::Edit => {
                if !book_form::show(ctx, FormMode::Edit, &mut self.draft, &emitter) {
                    self.dialog = ActiveDialog::None;
                }
            }
        }

        if self.show_settings {
            render_settings_window(ctx, &mut self.show_settings, &mut self.settings);
        }

        self.toasts.show(ctx, self.settings.toast_duration_s);

        // Worker results arrive between frames; keep polling while requests
        // are in flight (or results already queued) so they are applied
        // promptly without user input.
        if busy || self.event_bus.queue_len() > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    /// Save app state to persistent storage.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
        trace!(
            "App state saved: server={}, sort={:?}",
            self.settings.server_url, self.sort.key
        );
    }
}
