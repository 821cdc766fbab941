//! Star rating display.
//!
//! Pure mapping from a numeric rating to glyph counts, plus the egui
//! renderer. The input domain is clamped to 0-5 before the computation, so
//! negative or runaway values can never explode the glyph count.

use eframe::egui::{self, Color32, RichText};

/// Upper bound of the rating scale.
pub const MAX_RATING: f32 = 5.0;

const STAR_COLOR: Color32 = Color32::from_rgb(0xa9, 0xa9, 0xa9);

/// How many glyphs a rating renders as: `full` whole stars, plus at most one
/// half star for a non-zero fractional remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarCounts {
    pub full: u32,
    pub half: bool,
}

/// Map a rating to its glyph counts (clamped to the 0-5 domain).
pub fn star_counts(rating: f32) -> StarCounts {
    let clamped = rating.clamp(0.0, MAX_RATING);
    let full = clamped.floor();
    StarCounts {
        full: full as u32,
        half: clamped - full > 0.0,
    }
}

/// Draw the rating as a row of stars; the half unit is a dimmed star.
pub fn show(ui: &mut egui::Ui, rating: f32) {
    let counts = star_counts(rating);
    if counts.full == 0 && !counts.half {
        return;
    }

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        if counts.full > 0 {
            let full = "★".repeat(counts.full as usize);
            ui.label(RichText::new(full).color(STAR_COLOR));
        }
        if counts.half {
            ui.label(RichText::new("★").color(STAR_COLOR.linear_multiply(0.4)));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_rating_yields_only_full_stars() {
        assert_eq!(star_counts(3.0), StarCounts { full: 3, half: false });
    }

    #[test]
    fn fractional_rating_appends_exactly_one_half_star() {
        assert_eq!(star_counts(3.5), StarCounts { full: 3, half: true });
        assert_eq!(star_counts(4.25), StarCounts { full: 4, half: true });
    }

    #[test]
    fn zero_rating_yields_no_glyphs() {
        assert_eq!(star_counts(0.0), StarCounts { full: 0, half: false });
    }

    #[test]
    fn domain_is_clamped() {
        assert_eq!(star_counts(-2.0), StarCounts { full: 0, half: false });
        assert_eq!(star_counts(7.2), StarCounts { full: 5, half: false });
        assert_eq!(star_counts(5.0), StarCounts { full: 5, half: false });
    }
}
