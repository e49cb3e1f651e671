use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{FromColor, Hsl, Srgb};

use crate::data::model::RiskQuadrant;

/// Hue of the first sector colour (the green of the revenue authority branding).
const BASE_HUE: f32 = 120.0;
/// Successive hues are spread by the golden angle so adding a sector never
/// reshuffles the colours already handed out.
const GOLDEN_ANGLE: f32 = 137.507_76;

/// `n` sector colours, alternating two lightness levels so neighbours in a
/// grouped bar chart stay distinguishable.
pub fn sector_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (BASE_HUE + i as f32 * GOLDEN_ANGLE) % 360.0;
            let lightness = if i % 2 == 0 { 0.45 } else { 0.6 };
            let rgb = Srgb::from_color(Hsl::new(hue, 0.65, lightness)).into_format::<u8>();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// Fixed colour per quadrant, hottest first.
pub fn quadrant_color(quadrant: RiskQuadrant) -> Color32 {
    match quadrant {
        RiskQuadrant::HighRiskHighImpact => Color32::from_rgb(0xd6, 0x2d, 0x20),
        RiskQuadrant::HighRiskLowImpact => Color32::from_rgb(0xe8, 0x9a, 0x1c),
        RiskQuadrant::LowRiskHighImpact => Color32::from_rgb(0x2f, 0x7e, 0xd8),
        RiskQuadrant::LowRiskLowImpact => Color32::from_rgb(0x2e, 0x9d, 0x4f),
    }
}

/// Maps the distinct values of a categorical column (sectors in the
/// regional chart) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(values: &BTreeSet<String>) -> Self {
        let palette = sector_palette(values.len());
        let mapping = values.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (sector → colour) in sorted sector order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping.iter().map(|(v, c)| (v.clone(), *c)).collect()
    }
}
