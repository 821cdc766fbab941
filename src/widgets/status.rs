//! Status bar at the bottom of the window.

use eframe::egui;

use crate::core::catalog_events::ReloadRequestedEvent;
use crate::core::event_bus::EventEmitter;

/// Render backend URL, record count, a manual refresh button, and a spinner
/// while requests run.
pub fn show(
    ctx: &egui::Context,
    base_url: &str,
    book_count: usize,
    busy: bool,
    emitter: &EventEmitter,
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.monospace(base_url);

            ui.separator();

            ui.monospace(format!("{} livros", book_count));

            ui.separator();

            if ui.small_button("🔄").on_hover_text("Recarregar").clicked() {
                emitter.emit(ReloadRequestedEvent);
            }

            if busy {
                ui.separator();
                ui.spinner();
                ui.monospace("sincronizando…");
            }
        });
    });
}
