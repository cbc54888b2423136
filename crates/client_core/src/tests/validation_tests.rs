use super::*;

fn draft(name: &str, mark1: &str, mark2: &str) -> StudentDraft {
    StudentDraft::new(name, mark1, mark2)
}

#[test]
fn empty_fields_short_circuit_before_name_checks() {
    for (name, mark1, mark2) in [("", "50", "60"), ("Anna", "", "60"), ("Al", "50", "")] {
        assert_eq!(
            validate_draft(&draft(name, mark1, mark2)),
            Err(ValidationError::EmptyFields)
        );
    }
    assert_eq!(
        ValidationError::EmptyFields.to_string(),
        "Fields Cannot be empty!"
    );
}

#[test]
fn rejects_names_outside_length_bounds() {
    let short = validate_draft(&draft("Al", "50", "60")).expect_err("too short");
    assert_eq!(short, ValidationError::NameLength { len: 2 });
    assert_eq!(short.to_string(), "Name should be between 4 - 16 characters");

    let long = "A".repeat(17);
    assert_eq!(
        validate_name(&draft(&long, "1", "1")),
        Err(ValidationError::NameLength { len: 17 })
    );
}

#[test]
fn length_is_checked_before_pattern() {
    assert_eq!(
        validate_name(&draft("A1", "1", "1")),
        Err(ValidationError::NameLength { len: 2 })
    );
}

#[test]
fn name_length_counts_utf16_units() {
    // Each of these characters takes two UTF-16 units.
    assert_eq!(
        validate_name(&draft("\u{1D49C}bc", "1", "1")),
        Err(ValidationError::NamePattern)
    );
    assert_eq!(
        validate_name(&draft("\u{1F600}b", "1", "1")),
        Err(ValidationError::NameLength { len: 3 })
    );
}

#[test]
fn rejects_names_with_non_letters() {
    for name in ["Ann3", "Anna Bell", "An-na", "--Anna", "Anna-", "Zoë!", "____"] {
        let err = validate_name(&draft(name, "1", "1")).expect_err(name);
        assert_eq!(err, ValidationError::NamePattern, "{name}");
    }
    assert_eq!(
        ValidationError::NamePattern.to_string(),
        "Invalid name! Try Again !"
    );
}

#[test]
fn accepts_letter_names_with_optional_leading_hyphen() {
    for name in ["Anna", "-Anna", "-abc", "abcdefghijklmnop", "-abcdefghijklmno", "ZZZZ"] {
        assert_eq!(validate_name(&draft(name, "1", "1")), Ok(()), "{name}");
    }
}

#[test]
fn rejects_marks_outside_range() {
    let err = validate_draft(&draft("Anna", "150", "60")).expect_err("out of range");
    assert_eq!(
        err,
        ValidationError::MarkRange {
            field: DraftField::Mark1
        }
    );
    assert_eq!(err.to_string(), "Mark should be between 0-100");

    assert_eq!(
        validate_marks(&draft("Anna", "50", "-1")),
        Err(ValidationError::MarkRange {
            field: DraftField::Mark2
        })
    );
    assert!(validate_marks(&draft("Anna", "100.5", "0")).is_err());
}

#[test]
fn accepts_marks_on_and_within_bounds() {
    for (mark1, mark2) in [("0", "100"), ("100", "0"), ("50", "60"), ("99.5", " 42 ")] {
        assert_eq!(validate_marks(&draft("Anna", mark1, mark2)), Ok(()));
    }
}

#[test]
fn rejects_non_numeric_marks_locally() {
    assert_eq!(
        validate_draft(&draft("Anna", "fifty", "60")),
        Err(ValidationError::MarkNotNumeric {
            field: DraftField::Mark1
        })
    );
    assert_eq!(
        validate_marks(&draft("Anna", "50", "NaN")),
        Err(ValidationError::MarkNotNumeric {
            field: DraftField::Mark2
        })
    );
}

#[test]
fn hyphen_prefixed_draft_passes_all_checks() {
    assert_eq!(validate_draft(&draft("-Anna", "50", "60")), Ok(()));
}
