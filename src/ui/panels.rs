use audit_command_center::color::quadrant_color;
use audit_command_center::data::model::FeatureColumn;
use audit_command_center::state::{AppState, SelectionMode};
use eframe::egui::{self, Color32, RichText, Ui};

// ---------------------------------------------------------------------------
// Left side panel – audit selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Audit Selection");
    ui.label("Configure your audit criteria below.");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Feature selector ----
    ui.strong("Inspect feature");
    let mut feature = state.feature;
    egui::ComboBox::from_id_salt("feature")
        .selected_text(feature.name())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for col in FeatureColumn::ALL {
                ui.selectable_value(&mut feature, col, col.name());
            }
        });
    if feature != state.feature {
        state.set_feature(feature);
    }
    ui.separator();

    // ---- Selection mode ----
    ui.strong("Selection mode");
    let mut mode = state.mode;
    for m in SelectionMode::ALL {
        ui.radio_value(&mut mode, m, m.label());
    }
    if mode != state.mode {
        state.set_mode(mode);
    }

    // ---- Quadrant selector (quadrant mode only) ----
    if state.mode == SelectionMode::ByQuadrant {
        ui.add_space(6.0);
        ui.strong("Choose quadrant");
        let choices = state.quadrant_choices();
        let mut quadrant = state.quadrant;
        let selected_text = quadrant
            .map(|q| format!("{} {q}", q.icon()))
            .unwrap_or_default();
        egui::ComboBox::from_id_salt("quadrant")
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui: &mut Ui| {
                for q in choices {
                    let text = RichText::new(format!("{} {q}", q.icon())).color(quadrant_color(q));
                    ui.selectable_value(&mut quadrant, Some(q), text);
                }
            });
        if let Some(q) = quadrant.filter(|q| Some(*q) != state.quadrant) {
            state.set_quadrant(q);
        }
    }
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Selected cases, average score and revenue at stake.
pub fn kpi_row(ui: &mut Ui, state: &AppState) {
    ui.heading("Risk Intelligence Portal");
    ui.add_space(4.0);

    let summary = &state.summary;
    let avg = if summary.empty {
        "–".to_string()
    } else {
        format!("{:.1}%", summary.mean_score)
    };

    ui.columns(3, |cols| {
        metric(&mut cols[0], "Selected Cases", &summary.count.to_string());
        metric(&mut cols[1], "Avg. Risk Score", &avg);
        metric(&mut cols[2], "Revenue at Stake", &format_usd(summary.revenue_sum));
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

/// `$1,234,568` style: dollar sign, thousands separators, no cents.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} taxpayers loaded, {} selected",
                table.len(),
                state.summary.count
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open taxpayer risk data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open(&path);
    }
}
