//! Add/edit form over a [`BookDraft`].
//!
//! One form serves both dialogs; only the title and the submit action
//! differ. Fields bind straight to the draft strings - nothing is validated
//! client-side, the backend is the authority.

use eframe::egui;

use crate::core::catalog_events::{SubmitCreateEvent, SubmitUpdateEvent};
use crate::core::event_bus::EventEmitter;
use crate::entities::BookDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

impl FormMode {
    fn window_title(self) -> &'static str {
        match self {
            FormMode::Add => "Adicionar Livro",
            FormMode::Edit => "Editar Livro",
        }
    }

    fn submit_label(self) -> &'static str {
        match self {
            FormMode::Add => "Adicionar",
            FormMode::Edit => "Salvar Edições",
        }
    }
}

/// Render the form window. Returns false once the user closes it; the draft
/// is left intact either way (a failed submit keeps the dialog open with the
/// user's input).
pub fn show(
    ctx: &egui::Context,
    mode: FormMode,
    draft: &mut BookDraft,
    emitter: &EventEmitter,
) -> bool {
    let mut open = true;

    egui::Window::new(mode.window_title())
        .id(egui::Id::new("book_form_window"))
        .open(&mut open)
        .default_width(380.0)
        .resizable(true)
        .collapsible(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    text_field(ui, "Título", &mut draft.title, "Insira o título");
                    text_field(ui, "Autor(es)", &mut draft.authors, "Insira o(s) autor(es)");
                    text_field(
                        ui,
                        "Ano de Lançamento",
                        &mut draft.release_year,
                        "Insira o ano de publicação",
                    );
                    text_field(ui, "Gênero", &mut draft.genre, "Insira o gênero");

                    ui.label("Sinopse");
                    ui.add(
                        egui::TextEdit::multiline(&mut draft.synopsis)
                            .hint_text("Insira a sinopse")
                            .desired_rows(3)
                            .desired_width(f32::INFINITY),
                    );
                    ui.add_space(6.0);

                    text_field(ui, "Avaliação", &mut draft.rating, "Insira a avaliação");
                    text_field(ui, "Preço", &mut draft.price, "Insira o preço");
                    text_field(
                        ui,
                        "Imagem de capa",
                        &mut draft.cover_url,
                        "Insira o link da imagem de capa",
                    );

                    ui.add_space(8.0);
                    if ui.button(mode.submit_label()).clicked() {
                        match mode {
                            FormMode::Add => emitter.emit(SubmitCreateEvent(draft.clone())),
                            FormMode::Edit => emitter.emit(SubmitUpdateEvent(draft.clone())),
                        }
                    }
                });
        });

    open
}

fn text_field(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);
}
