use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Bar colour for expected distances.
pub const EXPECTED: Color32 = Color32::from_rgb(255, 215, 0);
/// Bar colour for actual distances.
pub const ACTUAL: Color32 = Color32::from_rgb(128, 128, 0);

// ---------------------------------------------------------------------------
// Per-car palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Label shown for car `index` in legends and tables.
pub fn car_label(index: usize) -> String {
    format!("car{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_one_distinct_colour_per_car() {
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn labels_count_from_zero() {
        assert_eq!(car_label(0), "car0");
        assert_eq!(car_label(11), "car11");
    }
}
