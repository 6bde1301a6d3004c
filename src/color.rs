use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Fixed outcome colors (single-site pie)
// ---------------------------------------------------------------------------

pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x2e, 0xa0, 0x43);
pub const FAILURE_COLOR: Color32 = Color32::from_rgb(0xc8, 0x3a, 0x2e);

/// Color for a pie slice labelled with an outcome, when applicable.
pub fn outcome_color(label: &str) -> Option<Color32> {
    match label {
        "Success" => Some(SUCCESS_COLOR),
        "Failure" => Some(FAILURE_COLOR),
        _ => None,
    }
}

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
            let hue = 20.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue % 360.0, 0.70, 0.50);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: categorical label → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct labels of a categorical column (launch sites, booster
/// version categories) to distinct colours. Deterministic for a given label
/// set, so chart and legend colours stay stable across recomputations.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map from a sorted set of labels.
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, color)| (label.to_string(), color))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a label. Unknown labels get gray.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}
