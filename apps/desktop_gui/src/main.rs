use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use client_core::{config::load_settings, gateway_from_settings, MissingStudentGateway, StudentGateway};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::{UiError, UiErrorContext, UiEvent};
use ui::RosterApp;

/// Falls back to a gateway that fails every call when the settings are
/// unusable, so the window still opens and shows why.
fn resolve_gateway() -> (Arc<dyn StudentGateway>, String, Option<UiError>) {
    let resolved = load_settings().and_then(|settings| {
        let label = settings.graphql_endpoint.clone();
        gateway_from_settings(&settings).map(|gateway| (gateway, label))
    });
    match resolved {
        Ok((gateway, label)) => (gateway, label, None),
        Err(err) => {
            let message = format!("{err:#}");
            tracing::error!("unusable roster settings: {message}");
            (
                Arc::new(MissingStudentGateway::new(message.clone())),
                "not configured".to_string(),
                Some(UiError::from_message(UiErrorContext::BackendStartup, message)),
            )
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (gateway, endpoint_label, startup_error) = resolve_gateway();
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(gateway, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("My Students")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Student Roster",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(RosterApp::new(
                cmd_tx,
                ui_rx,
                endpoint_label,
                startup_error,
            )))
        }),
    )
}
