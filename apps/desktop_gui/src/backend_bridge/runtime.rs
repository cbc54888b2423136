//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{run_effect, StudentGateway};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker. Each command runs as its own task, so a slow
/// call never blocks the ones queued after it.
pub fn launch(
    gateway: Arc<dyn StudentGateway>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::debug!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Run(effect) => {
                        let gateway = Arc::clone(&gateway);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let action = run_effect(gateway.as_ref(), effect).await;
                            if ui_tx.send(UiEvent::Roster(action)).is_err() {
                                tracing::debug!("ui closed before remote result arrived");
                            }
                        });
                    }
                }
            }
            tracing::debug!("command queue closed; backend worker stopping");
        });
    });
}
