use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::model::Status;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.65, 0.7).into_color();
            to_color32(rgb)
        })
        .collect()
}

pub fn status_color(status: Status) -> Color32 {
    match status {
        Status::Profit => Color32::from_rgb(0x00, 0xCC, 0x96),
        Status::Loss => Color32::from_rgb(0xEF, 0x55, 0x3B),
    }
}

// ---------------------------------------------------------------------------
// Continuous scales
// ---------------------------------------------------------------------------

const NEGATIVE: (f32, f32, f32) = (0.13, 0.40, 0.67);
const NEUTRAL: (f32, f32, f32) = (0.97, 0.97, 0.97);
const POSITIVE: (f32, f32, f32) = (0.70, 0.09, 0.17);

/// Blue → white → red scale for correlations in [-1, 1].
pub fn diverging(r: f64) -> Color32 {
    let t = r.clamp(-1.0, 1.0) as f32;
    let (far, factor) = if t < 0.0 { (NEGATIVE, -t) } else { (POSITIVE, t) };
    mix(NEUTRAL, far, factor)
}

/// Low → high ramp for numeric colouring; `t` is clamped to [0, 1].
pub fn sequential(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let rgb: Srgb = Hsl::new(260.0 - 200.0 * t, 0.7, 0.35 + 0.25 * t).into_color();
    to_color32(rgb)
}

/// Text colour that stays readable on `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn mix(a: (f32, f32, f32), b: (f32, f32, f32), factor: f32) -> Color32 {
    let a: LinSrgb = Srgb::new(a.0, a.1, a.2).into_linear();
    let b: LinSrgb = Srgb::new(b.0, b.1, b.2).into_linear();
    to_color32(Srgb::from_linear(a.mix(b, factor)))
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn diverging_scale_has_distinct_ends() {
        let low = diverging(-1.0);
        let mid = diverging(0.0);
        let high = diverging(1.0);
        assert!(low.b() > low.r());
        assert!(high.r() > high.b());
        assert!(mid.r() > 240 && mid.g() > 240 && mid.b() > 240);
        assert_eq!(diverging(5.0), high);
    }

    #[test]
    fn contrast_text_flips_on_dark_backgrounds() {
        assert_eq!(contrast_text(Color32::WHITE), Color32::BLACK);
        assert_eq!(contrast_text(Color32::from_rgb(20, 20, 80)), Color32::WHITE);
    }
}
