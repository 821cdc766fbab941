//! Record details window: cover image, all fields, and the edit entry point.

use eframe::egui::{self, RichText};

use crate::core::catalog_events::ShowEditEvent;
use crate::core::event_bus::EventEmitter;
use crate::entities::Book;
use crate::widgets::rating;

/// Render the details window for `book`. Returns false once the user closes
/// it.
pub fn show(ctx: &egui::Context, book: &Book, emitter: &EventEmitter) -> bool {
    let mut open = true;

    egui::Window::new("Detalhes do Livro")
        .id(egui::Id::new("details_window"))
        .open(&mut open)
        .default_width(380.0)
        .resizable(true)
        .collapsible(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    if !book.cover_url.trim().is_empty() {
                        // Remote cover, loaded by the http image loader;
                        // a broken URL just renders the loader's error text.
                        ui.add(
                            egui::Image::from_uri(book.cover_url.as_str())
                                .max_width(220.0)
                                .maintain_aspect_ratio(true),
                        );
                        ui.add_space(8.0);
                    }

                    field_row(ui, "Título", &book.title);
                    field_row(ui, "Autor(es)", &book.authors);
                    field_row(ui, "Ano de Lançamento", &book.release_year);
                    field_row(ui, "Gênero", &book.genre);
                    field_row(ui, "Sinopse", &book.synopsis);

                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Avaliação:").strong());
                        rating::show(ui, book.rating);
                    });
                    field_row(ui, "Preço", &format!("R$ {:.2}", book.price));

                    ui.add_space(8.0);
                    if ui.button("✏ Editar").clicked() {
                        emitter.emit(ShowEditEvent);
                    }
                });
        });

    open
}

fn field_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(format!("{}:", label)).strong());
        ui.label(value);
    });
}
