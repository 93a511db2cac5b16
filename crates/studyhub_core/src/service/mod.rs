//! Form controllers and list views.
//!
//! # Responsibility
//! - Validate each submission before any store call.
//! - Translate outcomes into explicit [`Notice`] values for the UI.
//!
//! # Invariants
//! - A rejected submission performs no store or storage writes.
//! - Admin-only operations check the acting user before validating input.
//! - Log lines carry field names and record ids, never field values.

pub mod admin_service;
pub mod auth_service;
pub mod catalog_service;
pub mod contact_service;

use crate::store::StoreError;
use crate::validation::FieldErrors;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Visual weight of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Transient notification shown after a submit or load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

/// Accepted submission: the stored record plus its success notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted<T> {
    pub record: T,
    pub notice: Notice,
}

/// Why a form submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// One or more fields failed validation; nothing was sent upstream.
    Invalid(FieldErrors),
    /// The acting user lacks the admin role.
    Forbidden,
    /// The external store refused or failed the request.
    Store(StoreError),
}

impl FormError {
    /// Field messages to render inline, for validation failures.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            Self::Invalid(_) => {
                Notice::failure("Validation Error", "Please check the form for errors")
            }
            Self::Forbidden => Notice::failure("Access denied", "Admin access required"),
            Self::Store(err) => Notice::failure("Error", err.message()),
        }
    }
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "invalid form input: {errors}"),
            Self::Forbidden => write!(f, "admin access required"),
            Self::Store(err) => write!(f, "store request failed: {err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Forbidden => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<FieldErrors> for FormError {
    fn from(value: FieldErrors) -> Self {
        Self::Invalid(value)
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Comma-separated field names for log lines.
pub(crate) fn field_list(errors: &FieldErrors) -> String {
    errors.fields().collect::<Vec<_>>().join(",")
}
