//! Static header bar - the view shell.

use eframe::egui::{self, RichText};

/// Render the top panel: centered product title, settings button on the
/// right.
pub fn show(ctx: &egui::Context, show_settings: &mut bool) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.columns(3, |columns| {
            columns[1].vertical_centered(|ui| {
                ui.label(RichText::new("📖 Livraria Digital").heading().strong());
            });
            columns[2].with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⚙").on_hover_text("Configurações").clicked() {
                    *show_settings = !*show_settings;
                }
            });
        });
        ui.add_space(6.0);
    });
}
