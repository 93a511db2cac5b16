//! Subject model.

use crate::model::check_description;
use crate::validation::{FieldCheck, FieldErrors, Validate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a subject record.
pub type SubjectId = Uuid;

pub const SUBJECT_NAME_MIN_CHARS: usize = 3;
pub const SUBJECT_NAME_MAX_CHARS: usize = 100;
pub const SUBJECT_DESCRIPTION_MAX_CHARS: usize = 500;

/// Admin "add subject" form as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubjectInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Accepted subject payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSubject {
    pub name: String,
    /// `None` when the form field was left blank.
    pub description: Option<String>,
}

impl Validate for SubjectInput {
    type Output = NewSubject;

    fn validate(&self) -> Result<NewSubject, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = FieldCheck::trimmed("name", &self.name)
            .min_chars(
                SUBJECT_NAME_MIN_CHARS,
                "Subject name must be at least 3 characters",
            )
            .max_chars(
                SUBJECT_NAME_MAX_CHARS,
                "Subject name must be less than 100 characters",
            )
            .finish(&mut errors);
        let description = check_description(
            self.description.as_deref(),
            SUBJECT_DESCRIPTION_MAX_CHARS,
            "Description must be less than 500 characters",
            &mut errors,
        );

        errors.into_result(|| NewSubject {
            name: name.to_string(),
            description,
        })
    }
}

/// Subject as stored by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub description: Option<String>,
}
