//! Portal form inputs, validated payloads and stored record shapes.
//!
//! # Responsibility
//! - Define raw form inputs exactly as the UI captures them.
//! - Define the normalized payloads handed to the external store.
//! - Mirror the record shapes the external store returns.
//!
//! # Invariants
//! - Raw inputs are never mutated by validation.
//! - Validated payloads only exist for inputs with zero field violations.
//! - Record timestamps are Unix epoch milliseconds.

pub mod auth;
pub mod contact;
pub mod pdf;
pub mod subject;
pub mod video;

use crate::validation::{is_canonical_uuid, is_valid_email, FieldCheck, FieldErrors};
use uuid::Uuid;

pub const EMAIL_MAX_CHARS: usize = 255;

const SUBJECT_ID_MESSAGE: &str = "Invalid subject selected";

/// Shared email pipeline for contact and auth forms.
pub(crate) fn check_email<'a>(raw: &'a str, errors: &mut FieldErrors) -> &'a str {
    FieldCheck::trimmed("email", raw)
        .max_chars(EMAIL_MAX_CHARS, "Email must be less than 255 characters")
        .rule(is_valid_email, "Invalid email address")
        .finish(errors)
}

/// Shared subject reference pipeline for PDF and video forms.
///
/// Returns `Uuid::nil()` for a rejected value; callers only read the result
/// when `errors` stays empty.
pub(crate) fn check_subject_id(raw: &str, errors: &mut FieldErrors) -> Uuid {
    let value = FieldCheck::trimmed("subjectId", raw)
        .rule(is_canonical_uuid, SUBJECT_ID_MESSAGE)
        .finish(errors);
    Uuid::try_parse(value).unwrap_or_else(|_| Uuid::nil())
}

/// Shared optional description pipeline.
pub(crate) fn check_description(
    raw: Option<&str>,
    max_chars: usize,
    message: &'static str,
    errors: &mut FieldErrors,
) -> Option<String> {
    FieldCheck::optional("description", raw)
        .max_chars(max_chars, message)
        .finish_optional(errors)
        .map(str::to_string)
}
