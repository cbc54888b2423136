use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(StudentId);

/// A student record as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default, deserialize_with = "mark_text")]
    pub mark1: String,
    #[serde(default, deserialize_with = "mark_text")]
    pub mark2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Unsaved form contents. Carries an id only while an existing record is
/// being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub id: Option<StudentId>,
    pub name: String,
    pub mark1: String,
    pub mark2: String,
}

impl StudentDraft {
    pub fn new(name: impl Into<String>, mark1: impl Into<String>, mark2: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            mark1: mark1.into(),
            mark2: mark2.into(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Mark1 => &self.mark1,
            DraftField::Mark2 => &self.mark2,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Name => self.name = value,
            DraftField::Mark1 => self.mark1 = value,
            DraftField::Mark2 => self.mark2 = value,
        }
    }
}

impl From<&Student> for StudentDraft {
    fn from(student: &Student) -> Self {
        Self {
            id: Some(student.id.clone()),
            name: student.name.clone(),
            mark1: student.mark1.clone(),
            mark2: student.mark2.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Mark1,
    Mark2,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::Name, DraftField::Mark1, DraftField::Mark2];

    pub fn placeholder(self) -> &'static str {
        match self {
            DraftField::Name => "Student name",
            DraftField::Mark1 => "Mark1",
            DraftField::Mark2 => "Mark2",
        }
    }
}

// Marks arrive as JSON numbers from typed schemas and as strings from
// untyped ones; the client keeps whatever the user would see. Stored records
// are never validated, so a null mark shows as blank.
fn mark_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Mark {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Mark>::deserialize(deserializer)? {
        Some(Mark::Text(text)) => text,
        Some(Mark::Number(number)) => number.to_string(),
        None => String::new(),
    })
}
