use std::collections::BTreeMap;

use audit_command_center::state::AppState;
use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Regional breakdown (bottom panel)
// ---------------------------------------------------------------------------

/// Grouped bars: one group per region, one bar per sector, height = mean score.
pub fn region_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Regional Risk Breakdown");

    if state.breakdown.is_empty() {
        ui.label("Nothing to chart for this selection.");
        return;
    }

    let mut regions: Vec<&str> = state.breakdown.iter().map(|b| b.region.as_str()).collect();
    regions.dedup();
    let mut sectors: Vec<&str> = state.breakdown.iter().map(|b| b.sector.as_str()).collect();
    sectors.sort_unstable();
    sectors.dedup();

    let bar_width = GROUP_WIDTH / sectors.len() as f64;
    let mut series: BTreeMap<&str, Vec<Bar>> = BTreeMap::new();
    for b in &state.breakdown {
        let region_idx = regions.iter().position(|r| *r == b.region).unwrap_or(0);
        let sector_idx = sectors.iter().position(|s| *s == b.sector).unwrap_or(0);
        let x = region_idx as f64 - GROUP_WIDTH / 2.0 + bar_width * (sector_idx as f64 + 0.5);
        series.entry(b.sector.as_str()).or_default().push(
            Bar::new(x, b.mean_score)
                .width(bar_width * 0.9)
                .name(format!("{} / {} ({} cases)", b.region, b.sector, b.count)),
        );
    }

    if let Some(colors) = &state.sector_colors {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            for (sector, color) in colors.legend_entries() {
                ui.label(RichText::new("■").color(color));
                ui.label(sector);
                ui.add_space(8.0);
            }
        });
    }

    let labels: Vec<String> = regions.iter().map(|r| r.to_string()).collect();
    Plot::new("region_chart")
        .y_axis_label("Mean prediction score")
        .include_y(0.0)
        .include_y(100.0)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                labels.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            for (sector, bars) in series {
                let color = state
                    .sector_colors
                    .as_ref()
                    .map_or(Color32::LIGHT_BLUE, |cm| cm.color_for(sector));
                plot_ui.bar_chart(BarChart::new(bars).name(sector).color(color));
            }
        });
}
