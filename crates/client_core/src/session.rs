use std::sync::Arc;

use anyhow::anyhow;
use shared::domain::{DraftField, StudentId};
use tracing::info;

use crate::{
    gateway::{run_effect, StudentGateway},
    roster::{RemoteEffect, RosterAction, RosterState},
};

/// Drives the roster reducer against a gateway, running each requested
/// effect to completion before returning.
pub struct RosterSession {
    gateway: Arc<dyn StudentGateway>,
    state: RosterState,
}

impl RosterSession {
    pub fn new(gateway: Arc<dyn StudentGateway>) -> Self {
        Self {
            gateway,
            state: RosterState::default(),
        }
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    pub async fn dispatch(&mut self, action: RosterAction) {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            let transition = std::mem::take(&mut self.state).apply(action);
            self.state = transition.state;
            if let Some(effect) = transition.effect {
                let outcome = run_effect(self.gateway.as_ref(), effect).await;
                log_outcome(&outcome);
                next = Some(outcome);
            }
        }
    }

    /// Replaces the local list with a fresh snapshot from the service.
    pub async fn load(&mut self) {
        let outcome = run_effect(self.gateway.as_ref(), RemoteEffect::Reload).await;
        log_outcome(&outcome);
        self.dispatch(outcome).await;
    }

    pub async fn edit_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.dispatch(RosterAction::FieldEdited {
            field,
            value: value.into(),
        })
        .await;
    }

    /// Starts editing a record from the current list.
    pub async fn start_edit(&mut self, id: &StudentId) -> anyhow::Result<()> {
        let student = self
            .state
            .students
            .iter()
            .find(|student| &student.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("no student with id '{id}' in the current list"))?;
        self.dispatch(RosterAction::EditStarted(student)).await;
        Ok(())
    }

    pub async fn submit(&mut self) {
        self.dispatch(RosterAction::SubmitRequested).await;
    }

    pub async fn delete(&mut self, id: StudentId) {
        self.dispatch(RosterAction::DeleteRequested(id)).await;
    }
}

fn log_outcome(outcome: &RosterAction) {
    match outcome {
        RosterAction::SubmitSucceeded { kind, student } => {
            info!(id = %student.id, ?kind, "student saved");
        }
        RosterAction::DeleteSucceeded(id) => info!(%id, "student deleted"),
        RosterAction::Loaded(students) => info!(count = students.len(), "students loaded"),
        _ => {}
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
