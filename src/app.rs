use audit_command_center::config::DashboardConfig;
use audit_command_center::state::AppState;
use eframe::egui;

use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AuditApp {
    pub state: AppState,
}

impl AuditApp {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            state: AppState::new(config.data_path.clone()),
        }
    }
}

impl eframe::App for AuditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: audit selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: regional breakdown ----
        egui::TopBottomPanel::bottom("breakdown_panel")
            .default_height(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                plot::region_chart(ui, &self.state);
            });

        // ---- Central panel: KPIs and results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::kpi_row(ui, &self.state);
            ui.separator();
            table::results_table(ui, &self.state);
        });
    }
}
