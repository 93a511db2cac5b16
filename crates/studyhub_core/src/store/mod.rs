//! Seams to the hosted backend (tables, object storage, auth).
//!
//! # Responsibility
//! - Define the data-access contracts form controllers and views call into.
//! - Keep the hosted service's client details out of controller code.
//!
//! # Invariants
//! - Callers only hand validated payloads to write methods.
//! - `list_subjects` is ordered by name ascending; PDF, video and contact
//!   listings are ordered newest first.
//! - Upstream failures surface as [`StoreError`] carrying the service's own
//!   message; this layer adds no retries.

mod memory;

pub use memory::{InMemoryStore, StoredObject};

use crate::model::auth::{AuthUser, SignInRequest, SignUpRequest};
use crate::model::contact::{ContactMessage, ContactRecord};
use crate::model::pdf::{NewPdfDocument, PdfDocument};
use crate::model::subject::{NewSubject, Subject, SubjectId};
use crate::model::video::{NewVideo, VideoRecord};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by the external store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Request refused by a policy or constraint other than uniqueness.
    Rejected(String),
    /// Uniqueness constraint violated.
    Conflict(String),
    /// Requested row or object does not exist.
    NotFound(String),
    /// Service unreachable or internally failed.
    Unavailable(String),
}

impl StoreError {
    /// Upstream message shown to the user verbatim.
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected(message)
            | Self::Conflict(message)
            | Self::NotFound(message)
            | Self::Unavailable(message) => message,
        }
    }

    /// Stable metadata code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "rejected",
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for StoreError {}

/// Subject table access.
pub trait SubjectStore {
    fn insert_subject(&self, subject: &NewSubject) -> StoreResult<Subject>;
    fn list_subjects(&self) -> StoreResult<Vec<Subject>>;
}

/// PDF and video table access, scoped by subject.
pub trait MaterialStore {
    fn insert_pdf(&self, pdf: &NewPdfDocument) -> StoreResult<PdfDocument>;
    fn list_pdfs(&self, subject_id: SubjectId) -> StoreResult<Vec<PdfDocument>>;
    fn insert_video(&self, video: &NewVideo) -> StoreResult<VideoRecord>;
    fn list_videos(&self, subject_id: SubjectId) -> StoreResult<Vec<VideoRecord>>;
}

/// Contact message table access.
pub trait ContactStore {
    fn insert_contact(&self, message: &ContactMessage) -> StoreResult<ContactRecord>;
    fn list_contacts(&self) -> StoreResult<Vec<ContactRecord>>;
}

/// Bucketed object storage with public read URLs.
pub trait ObjectStorage {
    fn upload(&self, bucket: &str, path: &str, bytes: &[u8], content_type: &str)
        -> StoreResult<()>;
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Hosted account service.
pub trait AuthProvider {
    fn sign_up(&self, request: &SignUpRequest) -> StoreResult<AuthUser>;
    fn sign_in(&self, request: &SignInRequest) -> StoreResult<AuthUser>;
}

impl<T: SubjectStore + ?Sized> SubjectStore for &T {
    fn insert_subject(&self, subject: &NewSubject) -> StoreResult<Subject> {
        (**self).insert_subject(subject)
    }

    fn list_subjects(&self) -> StoreResult<Vec<Subject>> {
        (**self).list_subjects()
    }
}

impl<T: MaterialStore + ?Sized> MaterialStore for &T {
    fn insert_pdf(&self, pdf: &NewPdfDocument) -> StoreResult<PdfDocument> {
        (**self).insert_pdf(pdf)
    }

    fn list_pdfs(&self, subject_id: SubjectId) -> StoreResult<Vec<PdfDocument>> {
        (**self).list_pdfs(subject_id)
    }

    fn insert_video(&self, video: &NewVideo) -> StoreResult<VideoRecord> {
        (**self).insert_video(video)
    }

    fn list_videos(&self, subject_id: SubjectId) -> StoreResult<Vec<VideoRecord>> {
        (**self).list_videos(subject_id)
    }
}

impl<T: ContactStore + ?Sized> ContactStore for &T {
    fn insert_contact(&self, message: &ContactMessage) -> StoreResult<ContactRecord> {
        (**self).insert_contact(message)
    }

    fn list_contacts(&self) -> StoreResult<Vec<ContactRecord>> {
        (**self).list_contacts()
    }
}

impl<T: ObjectStorage + ?Sized> ObjectStorage for &T {
    fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> StoreResult<()> {
        (**self).upload(bucket, path, bytes, content_type)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        (**self).public_url(bucket, path)
    }
}

impl<T: AuthProvider + ?Sized> AuthProvider for &T {
    fn sign_up(&self, request: &SignUpRequest) -> StoreResult<AuthUser> {
        (**self).sign_up(request)
    }

    fn sign_in(&self, request: &SignInRequest) -> StoreResult<AuthUser> {
        (**self).sign_in(request)
    }
}
