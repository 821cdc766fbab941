//! Transient toast notifications.
//!
//! Success/error messages stack in the top-right corner and expire after a
//! few seconds of being on screen. Expiry uses egui's frame clock
//! (`ctx.input(|i| i.time)`), counted from the first frame a toast is
//! rendered, so messages queued while the window was busy still get their
//! full display time.

use eframe::egui::{self, Align2, Color32, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    kind: ToastKind,
    message: String,
    shown_at: Option<f64>,
}

/// Toast queue owned by the app; render once per frame with [`Toasts::show`].
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    queue: Vec<Toast>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        self.queue.push(Toast {
            kind,
            message,
            shown_at: None,
        });
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn last_kind(&self) -> Option<ToastKind> {
        self.queue.last().map(|t| t.kind)
    }

    /// Render the stack and drop expired entries. `duration_s` is how long
    /// each toast stays visible.
    pub fn show(&mut self, ctx: &egui::Context, duration_s: f32) {
        if self.queue.is_empty() {
            return;
        }

        let now = ctx.input(|i| i.time);
        for toast in &mut self.queue {
            toast.shown_at.get_or_insert(now);
        }
        self.queue
            .retain(|t| t.shown_at.is_none_or(|shown| now - shown < duration_s as f64));

        if self.queue.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                for toast in &self.queue {
                    let fill = match toast.kind {
                        ToastKind::Success => Color32::from_rgb(0x2e, 0x7d, 0x32),
                        ToastKind::Error => Color32::from_rgb(0xc6, 0x28, 0x28),
                    };
                    egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                        ui.label(RichText::new(&toast.message).color(Color32::WHITE));
                    });
                    ui.add_space(4.0);
                }
            });

        // Keep the clock ticking so expiry happens without user input
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_queue_in_order() {
        let mut toasts = Toasts::default();
        assert!(toasts.is_empty());

        toasts.success("ok");
        toasts.error("fail");

        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts.last_kind(), Some(ToastKind::Error));
    }
}
