use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Legend index → colour id
// ---------------------------------------------------------------------------

/// Index into the classic ROOT colour table (1 black, 2 red, 3 green,
/// 4 blue, 5 yellow, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorId(pub u16);

/// Colour of the `index`-th legend entry.
///
/// Black, white and yellow are skipped so every line stays visible:
/// 0 → 2, 1 → 3, 2 → 4, 3 → 6, 4 → 7, ...
pub fn color_for(index: usize) -> ColorId {
    let id = if index < 3 { index + 2 } else { index + 3 };
    ColorId(u16::try_from(id).unwrap_or(u16::MAX))
}

// ---------------------------------------------------------------------------
// Colour id → RGB
// ---------------------------------------------------------------------------

const BASE_TABLE: [(u8, u8, u8); 10] = [
    (255, 255, 255), // 0 white
    (0, 0, 0),       // 1 black
    (255, 0, 0),     // 2 red
    (0, 255, 0),     // 3 green
    (0, 0, 255),     // 4 blue
    (255, 255, 0),   // 5 yellow
    (255, 0, 255),   // 6 magenta
    (0, 255, 255),   // 7 cyan
    (89, 212, 84),   // 8 dark green
    (89, 84, 217),   // 9 dark blue
];

impl ColorId {
    /// RGB value of this id. Ids past the base table get evenly spread
    /// hues (golden angle steps) at fixed saturation and lightness.
    pub fn rgb(self) -> RGBColor {
        if let Some(&(r, g, b)) = BASE_TABLE.get(self.0 as usize) {
            return RGBColor(r, g, b);
        }
        let step = (self.0 as usize - BASE_TABLE.len()) as f32;
        let hue = (step * 137.508) % 360.0;
        let hsl = Hsl::new(hue, 0.75, 0.45);
        let rgb: Srgb = hsl.into_color();
        RGBColor(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_reserved_colors() {
        let ids: Vec<u16> = (0..7).map(|i| color_for(i).0).collect();
        assert_eq!(ids, vec![2, 3, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn never_yields_black_white_or_yellow() {
        for i in 0..50 {
            let id = color_for(i).0;
            assert!(id != 0 && id != 1 && id != 5, "index {i} mapped to {id}");
        }
    }

    #[test]
    fn base_colors() {
        assert_eq!(ColorId(2).rgb(), RGBColor(255, 0, 0));
        assert_eq!(ColorId(4).rgb(), RGBColor(0, 0, 255));
    }

    #[test]
    fn generated_colors_differ() {
        let a = ColorId(10).rgb();
        let b = ColorId(11).rgb();
        assert_ne!(a, b);
        assert_ne!(a, RGBColor(255, 255, 255));
    }
}
