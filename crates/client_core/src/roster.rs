//! Roster state container and its reducer.
//!
//! `RosterState` is a plain value. Every user action or remote result is a
//! `RosterAction`; `RosterState::apply` consumes the old state and returns
//! the next one together with at most one `RemoteEffect` for the caller to
//! run against a gateway. Effect results are fed back in as actions.

use shared::domain::{DraftField, Student, StudentDraft, StudentId};
use tracing::debug;

use crate::{error::FailureKind, validation::validate_draft};

pub const STATUS_EDITING: &str = "Editing..";
pub const STATUS_CREATED: &str = "Created!";
pub const STATUS_UPDATED: &str = "Updated!";
pub const STATUS_DELETED: &str = "Deleted!";
pub const MESSAGE_SUBMIT_FAILED: &str = "Try Again! (Mark should be a number)";
pub const MESSAGE_LOAD_FAILED: &str = "Could not load students! Try Again!";
pub const MESSAGE_DELETE_FAILED: &str = "Delete failed! Reload to see the current list";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Create,
    Update,
}

impl SubmitKind {
    fn confirmation(self) -> &'static str {
        match self {
            SubmitKind::Create => STATUS_CREATED,
            SubmitKind::Update => STATUS_UPDATED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Editing,
    Submitting(SubmitKind),
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RosterAction {
    Loaded(Vec<Student>),
    LoadFailed(FailureKind),
    FieldEdited { field: DraftField, value: String },
    EditStarted(Student),
    SubmitRequested,
    SubmitSucceeded { kind: SubmitKind, student: Student },
    SubmitFailed { kind: SubmitKind, failure: FailureKind },
    DeleteRequested(StudentId),
    DeleteSucceeded(StudentId),
    DeleteFailed { id: StudentId, failure: FailureKind },
}

/// Remote work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteEffect {
    Reload,
    Create(StudentDraft),
    Update(StudentDraft),
    Delete(StudentId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterState {
    pub students: Vec<Student>,
    pub draft: StudentDraft,
    pub phase: SubmissionPhase,
    pub status: String,
    pub validation: String,
    pub last_failure: Option<FailureKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: RosterState,
    pub effect: Option<RemoteEffect>,
}

impl Transition {
    fn stay(state: RosterState) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    fn with(state: RosterState, effect: RemoteEffect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

impl RosterState {
    pub fn is_editing(&self) -> bool {
        self.draft.is_editing()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Submitting(_))
    }

    /// Delete is disabled for every card while a record is being edited.
    pub fn can_delete(&self) -> bool {
        !self.is_editing()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Student"
        } else {
            "Create Student"
        }
    }

    pub fn apply(self, action: RosterAction) -> Transition {
        match action {
            RosterAction::Loaded(students) => Transition::stay(RosterState { students, ..self }),
            RosterAction::LoadFailed(failure) => Transition::stay(RosterState {
                validation: MESSAGE_LOAD_FAILED.to_string(),
                last_failure: Some(failure),
                ..self
            }),
            RosterAction::FieldEdited { field, value } => self.edit_field(field, value),
            RosterAction::EditStarted(student) => self.start_edit(&student),
            RosterAction::SubmitRequested => self.submit(),
            RosterAction::SubmitSucceeded { kind, student } => {
                debug!(id = %student.id, ?kind, "submission confirmed");
                Transition::with(
                    RosterState {
                        draft: StudentDraft::default(),
                        phase: SubmissionPhase::Success,
                        status: kind.confirmation().to_string(),
                        validation: String::new(),
                        last_failure: None,
                        ..self
                    },
                    RemoteEffect::Reload,
                )
            }
            RosterAction::SubmitFailed { kind, failure } => {
                debug!(?kind, ?failure, "submission failed");
                Transition::stay(RosterState {
                    phase: SubmissionPhase::Error,
                    status: String::new(),
                    validation: MESSAGE_SUBMIT_FAILED.to_string(),
                    last_failure: Some(failure),
                    ..self
                })
            }
            RosterAction::DeleteRequested(id) => self.delete(id),
            RosterAction::DeleteSucceeded(_) => Transition::stay(RosterState {
                status: STATUS_DELETED.to_string(),
                ..self
            }),
            RosterAction::DeleteFailed { id, failure } => {
                debug!(%id, ?failure, "delete failed after optimistic removal");
                Transition::stay(RosterState {
                    status: String::new(),
                    validation: MESSAGE_DELETE_FAILED.to_string(),
                    last_failure: Some(failure),
                    ..self
                })
            }
        }
    }

    fn resting_phase(&self) -> SubmissionPhase {
        if self.is_editing() {
            SubmissionPhase::Editing
        } else {
            SubmissionPhase::Idle
        }
    }

    fn edit_field(mut self, field: DraftField, value: String) -> Transition {
        self.draft.set_field(field, value);
        if matches!(self.phase, SubmissionPhase::Success | SubmissionPhase::Error) {
            self.phase = self.resting_phase();
        }
        // Only the name input resets a confirmation; mark edits leave it shown.
        if field == DraftField::Name && self.status != STATUS_EDITING {
            self.status.clear();
        }
        Transition::stay(self)
    }

    fn start_edit(self, student: &Student) -> Transition {
        if self.is_submitting() {
            return Transition::stay(self);
        }
        Transition::stay(RosterState {
            draft: StudentDraft::from(student),
            phase: SubmissionPhase::Editing,
            status: STATUS_EDITING.to_string(),
            validation: String::new(),
            ..self
        })
    }

    fn submit(mut self) -> Transition {
        if self.is_submitting() {
            return Transition::stay(self);
        }
        self.status.clear();
        self.validation.clear();

        if let Err(err) = validate_draft(&self.draft) {
            self.validation = err.to_string();
            self.phase = self.resting_phase();
            return Transition::stay(self);
        }

        let (kind, effect) = if self.is_editing() {
            (SubmitKind::Update, RemoteEffect::Update(self.draft.clone()))
        } else {
            (SubmitKind::Create, RemoteEffect::Create(self.draft.clone()))
        };
        self.phase = SubmissionPhase::Submitting(kind);
        Transition::with(self, effect)
    }

    fn delete(mut self, id: StudentId) -> Transition {
        if !self.can_delete() {
            return Transition::stay(self);
        }
        self.status.clear();
        self.validation.clear();
        self.students.retain(|student| student.id != id);
        Transition::with(self, RemoteEffect::Delete(id))
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;
