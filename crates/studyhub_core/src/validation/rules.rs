//! Rule pipeline and shared domain predicates.

use super::FieldErrors;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use uuid::Uuid;

const CANONICAL_UUID_LEN: usize = 36;

// ASCII local part ending in a non-dot, dotted host labels, alphabetic TLD.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email regex must compile")
});

/// Ordered rule pipeline for one field.
///
/// Rules run in call order; once a rule fails the remaining rules are
/// skipped and the first failure becomes the field's message.
///
/// ```
/// use studyhub_core::validation::{FieldCheck, FieldErrors};
///
/// let mut errors = FieldErrors::new();
/// let name = FieldCheck::trimmed("name", "  Ada  ")
///     .min_chars(3, "too short")
///     .max_chars(10, "too long")
///     .finish(&mut errors);
/// assert_eq!(name, "Ada");
/// assert!(errors.is_empty());
/// ```
#[derive(Debug)]
pub struct FieldCheck<'a> {
    field: &'static str,
    value: &'a str,
    absent: bool,
    failure: Option<&'static str>,
}

impl<'a> FieldCheck<'a> {
    /// Starts a pipeline over the whitespace-trimmed value.
    pub fn trimmed(field: &'static str, raw: &'a str) -> Self {
        Self {
            field,
            value: raw.trim(),
            absent: false,
            failure: None,
        }
    }

    /// Starts a pipeline over the value exactly as typed.
    ///
    /// Used for secrets, where surrounding whitespace is significant.
    pub fn untrimmed(field: &'static str, raw: &'a str) -> Self {
        Self {
            field,
            value: raw,
            absent: false,
            failure: None,
        }
    }

    /// Starts a pipeline for an optional text field.
    ///
    /// A missing or blank value is absent and skips every rule.
    pub fn optional(field: &'static str, raw: Option<&'a str>) -> Self {
        let value = raw.map(str::trim).unwrap_or_default();
        Self {
            field,
            value,
            absent: value.is_empty(),
            failure: None,
        }
    }

    /// Requires at least `min` characters.
    pub fn min_chars(self, min: usize, message: &'static str) -> Self {
        self.rule(|value| value.chars().count() >= min, message)
    }

    /// Allows at most `max` characters.
    pub fn max_chars(self, max: usize, message: &'static str) -> Self {
        self.rule(|value| value.chars().count() <= max, message)
    }

    /// Requires `pattern` to match somewhere in the value.
    pub fn matches(self, pattern: &Regex, message: &'static str) -> Self {
        self.rule(|value| pattern.is_match(value), message)
    }

    /// Applies an arbitrary predicate as the next rule.
    pub fn rule(mut self, predicate: impl FnOnce(&str) -> bool, message: &'static str) -> Self {
        if self.absent || self.failure.is_some() {
            return self;
        }
        if !predicate(self.value) {
            self.failure = Some(message);
        }
        self
    }

    /// Records the field outcome and returns the normalized value.
    ///
    /// The returned value is only meaningful when `errors` stays empty.
    pub fn finish(self, errors: &mut FieldErrors) -> &'a str {
        if let Some(message) = self.failure {
            errors.push(self.field, message);
        }
        self.value
    }

    /// Like [`FieldCheck::finish`], mapping an absent value to `None`.
    pub fn finish_optional(self, errors: &mut FieldErrors) -> Option<&'a str> {
        let absent = self.absent;
        let value = self.finish(errors);
        (!absent).then_some(value)
    }
}

/// Returns whether `value` is an address in the form the web forms accept.
///
/// The local part is ASCII letters, digits and `_'+-.`; it may not start
/// with a dot, end with a dot or contain `..`. The domain is one or more
/// `label.` segments followed by an alphabetic TLD of two or more letters.
/// Quoted local parts, IP literals and display names are rejected. Local
/// part length is not capped; callers bound the whole address instead.
pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

/// Returns whether `value` is a hyphenated 8-4-4-4-12 hexadecimal identifier.
///
/// Simple, braced and URN encodings are not canonical and are rejected.
pub fn is_canonical_uuid(value: &str) -> bool {
    value.len() == CANONICAL_UUID_LEN && Uuid::try_parse(value).is_ok()
}

/// Returns whether `value` parses as an absolute http(s) URL with a host.
pub fn is_web_url(value: &str) -> bool {
    Url::parse(value)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .is_some()
}
