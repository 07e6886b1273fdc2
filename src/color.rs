use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Column colours
// ---------------------------------------------------------------------------

/// Colour of the `index`-th of `n` numeric columns, taken from `n` evenly
/// spaced hues. Falls back to light blue when there is nothing to spread hues over.
pub fn column_color(index: usize, n: usize) -> Color32 {
    if n == 0 {
        return Color32::LIGHT_BLUE;
    }
    hue_color(index % n, n)
}

/// Colour of the `i`-th of `n` evenly spaced hues.
fn hue_color(i: usize, n: usize) -> Color32 {
    let hue = (i as f32 / n as f32) * 360.0;
    let hsl = Hsl::new(hue, 0.65, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
