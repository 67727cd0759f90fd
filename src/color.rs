use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::highlight::HighlightRank;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` distinct pastel colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.6, 0.72);
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
// Highlight shades
// ---------------------------------------------------------------------------

/// Cell background for a top-3 rank; rank 1 is the strongest green.
pub fn rank_color(rank: HighlightRank) -> Color32 {
    match rank {
        HighlightRank::First => Color32::from_rgb(0x90, 0xEE, 0x90),
        HighlightRank::Second => Color32::from_rgb(0xC1, 0xFF, 0xC1),
        HighlightRank::Third => Color32::from_rgb(0xF0, 0xFF, 0xF0),
    }
}

// ---------------------------------------------------------------------------
// Color mapping: metric column → Color32
// ---------------------------------------------------------------------------

/// Maps chart metrics (one bar series each) to distinct colours.
#[derive(Debug, Clone)]
pub struct MetricColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl MetricColors {
    /// Assign colours in the order the metrics are given.
    pub fn new<S: AsRef<str>>(metrics: &[S]) -> Self {
        let palette = generate_palette(metrics.len());
        let mapping = metrics
            .iter()
            .zip(palette)
            .map(|(m, c)| (m.as_ref().to_string(), c))
            .collect();

        MetricColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, metric: &str) -> Color32 {
        self.mapping
            .get(metric)
            .copied()
            .unwrap_or(self.default_color)
    }
}
