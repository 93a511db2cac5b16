//! Contact message model.

use crate::model::check_email;
use crate::validation::{FieldCheck, FieldErrors, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CONTACT_NAME_MAX_CHARS: usize = 100;
pub const CONTACT_MESSAGE_MIN_CHARS: usize = 10;
pub const CONTACT_MESSAGE_MAX_CHARS: usize = 2000;

// ASCII letters only; accented names are rejected on purpose.
static CONTACT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s\-']+$").expect("valid contact name regex"));

/// Contact form as typed by a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Accepted contact message with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Validate for ContactInput {
    type Output = ContactMessage;

    fn validate(&self) -> Result<ContactMessage, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = FieldCheck::trimmed("name", &self.name)
            .min_chars(1, "Name is required")
            .max_chars(
                CONTACT_NAME_MAX_CHARS,
                "Name must be less than 100 characters",
            )
            .matches(
                &CONTACT_NAME_RE,
                "Name can only contain letters, spaces, hyphens, and apostrophes",
            )
            .finish(&mut errors);
        let email = check_email(&self.email, &mut errors);
        let message = FieldCheck::trimmed("message", &self.message)
            .min_chars(
                CONTACT_MESSAGE_MIN_CHARS,
                "Message must be at least 10 characters",
            )
            .max_chars(
                CONTACT_MESSAGE_MAX_CHARS,
                "Message must be less than 2000 characters",
            )
            .finish(&mut errors);

        errors.into_result(|| ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

/// Contact message as stored by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: i64,
}
