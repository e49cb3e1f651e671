use audit_command_center::color::quadrant_color;
use audit_command_center::data::model::FeatureColumn;
use audit_command_center::state::AppState;
use eframe::egui::{self, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Results table (central panel)
// ---------------------------------------------------------------------------

/// Name, id, the inspected feature and the prediction score, highest score first.
pub fn results_table(ui: &mut Ui, state: &AppState) {
    let Some(rows) = &state.filtered else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a taxpayer file to begin  (File → Open…)");
        });
        return;
    };

    let mode = state
        .filter_mode()
        .map(|m| m.to_string())
        .unwrap_or_default();
    ui.strong(format!("Results: {mode}"));
    ui.add_space(4.0);

    if rows.is_empty() {
        ui.label("No taxpayers match this selection.");
        return;
    }

    let feature = state.feature;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(180.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder().at_least(160.0))
        .header(ROW_HEIGHT + 4.0, |mut header| {
            header.col(|ui| {
                ui.strong("taxpayer_name");
            });
            header.col(|ui| {
                ui.strong("taxpayer_id");
            });
            header.col(|ui| {
                ui.strong(feature.name());
            });
            header.col(|ui| {
                ui.strong("Prediction Score");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.display_order.len(), |mut row| {
                let record = &rows.rows[state.display_order[row.index()]];
                row.col(|ui| {
                    ui.label(&record.taxpayer_name);
                });
                row.col(|ui| {
                    ui.monospace(&record.taxpayer_id);
                });
                row.col(|ui| {
                    let value = feature.value(record);
                    match feature {
                        FeatureColumn::RiskQuadrant => {
                            let q = record.risk_quadrant;
                            ui.label(
                                RichText::new(format!("{} {q}", q.icon())).color(quadrant_color(q)),
                            );
                        }
                        FeatureColumn::AnnualRevenueUsd => {
                            ui.label(crate::ui::panels::format_usd(record.annual_revenue_usd));
                        }
                        _ if value.as_f64().is_some() => {
                            ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(value.to_string());
                            });
                        }
                        _ => {
                            ui.label(value.to_string());
                        }
                    }
                });
                row.col(|ui| {
                    let score = record.prediction_score.clamp(0.0, 100.0);
                    ui.add(
                        egui::ProgressBar::new((score / 100.0) as f32)
                            .text(format!("{:.0}%", record.prediction_score)),
                    );
                });
            });
        });
}
