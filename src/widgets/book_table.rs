//! The book list: toolbar plus sortable table.
//!
//! Purely presentational - every click becomes an event on the bus and the
//! app's handlers do the actual work next frame.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use crate::core::catalog_events::{
    DeleteRequestedEvent, ShowAddEvent, ShowDetailsEvent, SortRequestedEvent,
};
use crate::core::event_bus::EventEmitter;
use crate::entities::{Book, SortKey, SortState};
use crate::widgets::rating;

const ROW_HEIGHT: f32 = 24.0;

/// Render the heading, the add button, and the table.
pub fn show(ui: &mut egui::Ui, books: &[Book], sort: &SortState, emitter: &EventEmitter) {
    ui.horizontal(|ui| {
        ui.heading("Livros");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("➕").on_hover_text("Adicionar livro").clicked() {
                emitter.emit(ShowAddEvent);
            }
        });
    });
    ui.add_space(8.0);

    TableBuilder::new(ui)
        .id_salt("books_table")
        .striped(true)
        .column(Column::auto().at_least(48.0))
        .column(Column::remainder().at_least(120.0))
        .column(Column::remainder().at_least(100.0))
        .column(Column::auto().at_least(96.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(64.0))
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| sort_header(ui, "#", SortKey::Id, sort, emitter));
            header.col(|ui| sort_header(ui, "Título", SortKey::Title, sort, emitter));
            header.col(|ui| sort_header(ui, "Autores", SortKey::Authors, sort, emitter));
            header.col(|ui| sort_header(ui, "Avaliação", SortKey::Rating, sort, emitter));
            header.col(|ui| sort_header(ui, "Preço", SortKey::Price, sort, emitter));
            header.col(|_ui| {});
        })
        .body(|mut body| {
            for book in books {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.monospace(book.id.to_string());
                    });
                    row.col(|ui| {
                        ui.label(&book.title);
                    });
                    row.col(|ui| {
                        ui.label(&book.authors);
                    });
                    row.col(|ui| {
                        rating::show(ui, book.rating);
                    });
                    row.col(|ui| {
                        ui.label(format!("R$ {:.2}", book.price));
                    });
                    row.col(|ui| {
                        ui.horizontal(|ui| {
                            if ui.small_button("ℹ").on_hover_text("Detalhes").clicked() {
                                emitter.emit(ShowDetailsEvent(book.clone()));
                            }
                            if ui.small_button("🗑").on_hover_text("Excluir").clicked() {
                                emitter.emit(DeleteRequestedEvent(book.id));
                            }
                        });
                    });
                });
            }
        });
}

/// Header cell: column label plus the sort toggle button. The active column
/// shows its direction; inactive columns show a neutral arrow.
fn sort_header(
    ui: &mut egui::Ui,
    label: &str,
    key: SortKey,
    sort: &SortState,
    emitter: &EventEmitter,
) {
    ui.horizontal(|ui| {
        ui.strong(label);
        let arrow = match sort.direction(key) {
            Some(true) => RichText::new("⏶").strong(),
            Some(false) => RichText::new("⏷").strong(),
            None => RichText::new("⏷").weak(),
        };
        if ui.small_button(arrow).clicked() {
            emitter.emit(SortRequestedEvent(key));
        }
    });
}
