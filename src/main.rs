mod app;
mod backend;
mod event;
mod format;
mod intent;
mod profile;
mod theme;
mod views;

use app::OctochatApp;
use backend::BackendClient;
use eframe::egui;
use std::sync::mpsc;
use tracing_subscriber::EnvFilter;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

fn api_url() -> String {
    std::env::var("OCTOCHAT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (tx, rx) = mpsc::channel();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("octochat-runtime")
        .build()?;
    let backend = BackendClient::new(api_url(), runtime.handle().clone(), tx);

    let (stored_profile, warning) = profile::store::load();
    if let Some(warning) = warning {
        tracing::warn!("profile load warning: {warning}");
    }

    let app = OctochatApp::new(rx, backend, stored_profile);
    let theme = app.theme();
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Octochat",
        native_options,
        Box::new(move |creation_context| {
            theme.apply(&creation_context.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
