//! Sign-up / sign-in forms and the authenticated user shape.
//!
//! # Invariants
//! - Passwords are validated as typed; they are never trimmed.
//! - `Debug` output never contains a password.

use crate::model::check_email;
use crate::validation::{FieldCheck, FieldErrors, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use uuid::Uuid;

pub const FULL_NAME_MIN_CHARS: usize = 2;
pub const FULL_NAME_MAX_CHARS: usize = 100;
pub const PASSWORD_MIN_CHARS: usize = 8;

static UPPERCASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static LOWERCASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("valid regex"));

const REDACTED: &str = "<redacted>";

/// Registration form as typed.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Accepted registration payload.
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Login form as typed.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Accepted login payload.
#[derive(Clone, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl Validate for SignUpInput {
    type Output = SignUpRequest;

    fn validate(&self) -> Result<SignUpRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        let full_name = FieldCheck::trimmed("fullName", &self.full_name)
            .min_chars(
                FULL_NAME_MIN_CHARS,
                "Full name must be at least 2 characters",
            )
            .max_chars(
                FULL_NAME_MAX_CHARS,
                "Full name must be less than 100 characters",
            )
            .finish(&mut errors);
        let email = check_email(&self.email, &mut errors);
        let password = FieldCheck::untrimmed("password", &self.password)
            .min_chars(PASSWORD_MIN_CHARS, "Password must be at least 8 characters")
            .matches(
                &UPPERCASE_RE,
                "Password must contain at least one uppercase letter",
            )
            .matches(
                &LOWERCASE_RE,
                "Password must contain at least one lowercase letter",
            )
            .matches(&DIGIT_RE, "Password must contain at least one number")
            .finish(&mut errors);

        errors.into_result(|| SignUpRequest {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

impl Validate for SignInInput {
    type Output = SignInRequest;

    fn validate(&self) -> Result<SignInRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = check_email(&self.email, &mut errors);
        let password = FieldCheck::untrimmed("password", &self.password)
            .min_chars(1, "Password is required")
            .finish(&mut errors);

        errors.into_result(|| SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

impl Debug for SignUpInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpInput")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl Debug for SignUpRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl Debug for SignInInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInInput")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl Debug for SignInRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Authenticated account as reported by the external auth service.
///
/// Passed explicitly to controllers that need the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub is_admin: bool,
}
