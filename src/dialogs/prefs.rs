//! Application settings and the settings window.
//!
//! Persisted through eframe storage as part of the app state. The backend
//! URL edited here is applied once the window closes (the catalog service is
//! rebuilt and a reload issued by the app loop).

use eframe::egui;
use serde::{Deserialize, Serialize};

/// Backend used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "https://sistema-livraria-spring-boot.onrender.com";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL of the catalog backend (no trailing slash required).
    pub server_url: String,

    // UI
    pub dark_mode: bool,
    pub font_size: f32,

    /// Seconds a toast stays on screen.
    pub toast_duration_s: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            dark_mode: true,
            font_size: 14.0,
            toast_duration_s: 4.0,
        }
    }
}

/// Render settings window
pub fn render_settings_window(
    ctx: &egui::Context,
    show_settings: &mut bool,
    settings: &mut AppSettings,
) {
    egui::Window::new("Configurações")
        .id(egui::Id::new("settings_window"))
        .open(show_settings)
        .default_width(420.0)
        .resizable(true)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.heading("Servidor");
            ui.add_space(8.0);

            ui.label("URL do backend:");
            ui.add(
                egui::TextEdit::singleline(&mut settings.server_url)
                    .hint_text(DEFAULT_SERVER_URL)
                    .desired_width(f32::INFINITY),
            );
            ui.label("Aplicada ao fechar esta janela.");

            ui.add_space(16.0);
            ui.heading("Aparência");
            ui.add_space(8.0);

            ui.checkbox(&mut settings.dark_mode, "Modo escuro");

            ui.label("Tamanho da fonte:");
            ui.add(
                egui::Slider::new(&mut settings.font_size, 10.0..=20.0)
                    .suffix(" px")
                    .step_by(0.5),
            );

            ui.add_space(16.0);
            ui.heading("Notificações");
            ui.add_space(8.0);

            ui.label("Duração das notificações:");
            ui.add(
                egui::Slider::new(&mut settings.toast_duration_s, 1.0..=10.0)
                    .suffix(" s")
                    .step_by(0.5),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_public_backend() {
        let settings = AppSettings::default();
        assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
        assert!(settings.dark_mode);
    }

    #[test]
    fn settings_round_trip_through_serde() {
        let mut settings = AppSettings::default();
        settings.server_url = "http://localhost:8080".to_string();
        settings.font_size = 16.0;

        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.server_url, "http://localhost:8080");
        assert_eq!(back.font_size, 16.0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let back: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(back.server_url, DEFAULT_SERVER_URL);
        assert_eq!(back.toast_duration_s, 4.0);
    }
}
