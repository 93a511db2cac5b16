//! Field-level validation for portal form inputs.
//!
//! # Responsibility
//! - Run each field through an ordered rule pipeline.
//! - Collect one message per failing field without short-circuiting the form.
//!
//! # Invariants
//! - The first failing rule of a field supplies its message.
//! - Every field of a schema is evaluated, even after another field failed.
//! - A schema either yields a fully normalized value or a non-empty
//!   `FieldErrors`; partial success does not exist.
//! - Rules see the trimmed value unless the field opts out of trimming.

mod rules;

pub use rules::{is_canonical_uuid, is_valid_email, is_web_url, FieldCheck};

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Schema-level validation entry point.
///
/// Implementations borrow the caller's raw input and return a new normalized
/// value; the input itself is never modified.
pub trait Validate {
    /// Normalized, accepted form of the input.
    type Output;

    /// Checks every field and returns either normalized data or all violations.
    fn validate(&self) -> Result<Self::Output, FieldErrors>;
}

/// One failed constraint attached to one named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Ordered set of field violations for one rejected input.
///
/// Holds at most one violation per field, in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    violations: Vec<FieldViolation>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a rejection carrying a single violation.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Records a violation unless the field already has one.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_some() {
            return;
        }
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    /// Returns the message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.violations
            .iter()
            .find(|violation| violation.field == field)
            .map(|violation| violation.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Field names with a violation, in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.violations.iter().map(|violation| violation.field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.violations.iter()
    }

    /// Converts collected violations into a schema result.
    ///
    /// `build` only runs when no field failed.
    pub fn into_result<T>(self, build: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(build())
        } else {
            Err(self)
        }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldViolation;
    type IntoIter = std::slice::Iter<'a, FieldViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
