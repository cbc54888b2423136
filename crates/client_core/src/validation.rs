//! Client-side checks run on a draft before any remote call.
//!
//! Checks run in a fixed order (required fields, then name, then marks) and
//! the first failure wins.

use std::sync::LazyLock;

use regex::Regex;
use shared::domain::{DraftField, StudentDraft};
use thiserror::Error;

pub const NAME_MIN_LEN: usize = 4;
pub const NAME_MAX_LEN: usize = 16;
pub const MARK_MIN: f64 = 0.0;
pub const MARK_MAX: f64 = 100.0;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[A-Za-z]*$").expect("name pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Fields Cannot be empty!")]
    EmptyFields,
    #[error("Name should be between 4 - 16 characters")]
    NameLength { len: usize },
    #[error("Invalid name! Try Again !")]
    NamePattern,
    #[error("Mark should be between 0-100")]
    MarkRange { field: DraftField },
    #[error("Mark should be a number")]
    MarkNotNumeric { field: DraftField },
}

pub fn check_required(draft: &StudentDraft) -> Result<(), ValidationError> {
    if draft.name.is_empty() || draft.mark1.is_empty() || draft.mark2.is_empty() {
        return Err(ValidationError::EmptyFields);
    }
    Ok(())
}

pub fn validate_name(draft: &StudentDraft) -> Result<(), ValidationError> {
    // UTF-16 units, the way browser form inputs count length.
    let len = draft.name.encode_utf16().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::NameLength { len });
    }
    if !NAME_PATTERN.is_match(&draft.name) {
        return Err(ValidationError::NamePattern);
    }
    Ok(())
}

pub fn validate_marks(draft: &StudentDraft) -> Result<(), ValidationError> {
    for field in [DraftField::Mark1, DraftField::Mark2] {
        let mark = parse_mark(draft.field(field))
            .ok_or(ValidationError::MarkNotNumeric { field })?;
        if !(MARK_MIN..=MARK_MAX).contains(&mark) {
            return Err(ValidationError::MarkRange { field });
        }
    }
    Ok(())
}

pub fn validate_draft(draft: &StudentDraft) -> Result<(), ValidationError> {
    check_required(draft)?;
    validate_name(draft)?;
    validate_marks(draft)
}

fn parse_mark(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|mark| !mark.is_nan())
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
