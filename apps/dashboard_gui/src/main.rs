mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::bounded;

/// Desktop dashboard for Akucuciin drivers.
#[derive(Parser, Debug)]
#[command(name = "dashboard_gui")]
struct Args {
    /// Overrides the server URL from dashboard.toml / APP__SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let settings = config::load_settings(args.server_url);
    tracing::info!(server_url = %settings.server_url, "starting dashboard");

    let (cmd_tx, cmd_rx) = bounded(64);
    let (ui_tx, ui_rx) = bounded(256);
    backend_bridge::runtime::launch(settings.server_url.clone(), cmd_rx, ui_tx);

    let app = ui::app::DashboardApp::new(cmd_tx, ui_rx);
    eframe::run_native(
        "Akucuciin Driver Dashboard",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("failed to start dashboard shell: {err}"))
}
