mod app;
mod ui;

use std::path::PathBuf;

use app::AuditApp;
use audit_command_center::config::DashboardConfig;
use clap::Parser;
use eframe::egui;

/// ZIMRA Audit Command Center - taxpayer risk dashboard
#[derive(Parser, Debug)]
#[command(name = "audit-command-center")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Taxpayer CSV to open (overrides the config file)
    #[arg(value_name = "CSV", env = "AUDIT_DATA_PATH")]
    data_path: Option<PathBuf>,

    /// Configuration file path (JSON format)
    #[arg(short, long, value_name = "FILE", env = "AUDIT_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let config = DashboardConfig::resolve(cli.config.as_deref(), cli.data_path.clone())
        .unwrap_or_else(|e| {
            log::error!("{e}; falling back to defaults");
            DashboardConfig {
                data_path: cli.data_path.unwrap_or_else(|| DashboardConfig::default().data_path),
                ..DashboardConfig::default()
            }
        });
    log::info!("Reading taxpayer data from {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ZIMRA Audit Command Center",
        options,
        Box::new(move |_cc| Ok(Box::new(AuditApp::new(&config)))),
    )
}
