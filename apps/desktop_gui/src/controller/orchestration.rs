//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{FailureKind, RemoteEffect, RosterAction, RosterState, SubmitKind};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

/// Queues a command for the backend worker. On failure the command is handed
/// back together with the error to show.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), (BackendCommand, UiError)> {
    let cmd_name = match &cmd {
        BackendCommand::Run(RemoteEffect::Reload) => "reload",
        BackendCommand::Run(RemoteEffect::Create(_)) => "create",
        BackendCommand::Run(RemoteEffect::Update(_)) => "update",
        BackendCommand::Run(RemoteEffect::Delete(_)) => "delete",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => Err((
            cmd,
            UiError::from_message(
                UiErrorContext::CommandQueue,
                "UI command queue is full; please retry",
            ),
        )),
        Err(TrySendError::Disconnected(cmd)) => Err((
            cmd,
            UiError::from_message(
                UiErrorContext::CommandQueue,
                "Backend command processor disconnected; restart the app",
            ),
        )),
    }
}

/// Runs `action` through the reducer and queues whatever effect it asks for.
/// An effect that cannot be queued is resolved locally as a transport
/// failure so the form never stays stuck in a submitting state.
pub fn apply_roster_action(
    roster: &mut RosterState,
    action: RosterAction,
    cmd_tx: &Sender<BackendCommand>,
    banner: &mut Option<UiError>,
) {
    let mut next = Some(action);
    while let Some(action) = next.take() {
        let transition = std::mem::take(roster).apply(action);
        *roster = transition.state;
        let Some(effect) = transition.effect else {
            continue;
        };
        if let Err((BackendCommand::Run(effect), err)) =
            dispatch_backend_command(cmd_tx, BackendCommand::Run(effect))
        {
            tracing::warn!("{}", err.message());
            *banner = Some(err);
            next = Some(undeliverable(effect));
        }
    }
}

fn undeliverable(effect: RemoteEffect) -> RosterAction {
    let failure = FailureKind::Transport;
    match effect {
        RemoteEffect::Reload => RosterAction::LoadFailed(failure),
        RemoteEffect::Create(_) => RosterAction::SubmitFailed {
            kind: SubmitKind::Create,
            failure,
        },
        RemoteEffect::Update(_) => RosterAction::SubmitFailed {
            kind: SubmitKind::Update,
            failure,
        },
        RemoteEffect::Delete(id) => RosterAction::DeleteFailed { id, failure },
    }
}
