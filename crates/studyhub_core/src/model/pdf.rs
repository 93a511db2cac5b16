//! PDF study material model.
//!
//! # Invariants
//! - Only files whose declared media type is `application/pdf` are accepted.
//! - Accepted files are at most [`PDF_MAX_BYTES`] long.
//! - The upload payload bytes stay with the caller's [`PdfFile`]; validation
//!   only records file metadata.

use crate::model::subject::SubjectId;
use crate::model::{check_description, check_subject_id};
use crate::validation::{FieldCheck, FieldErrors, Validate};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::path::Path;
use uuid::Uuid;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const PDF_MAX_BYTES: u64 = 50 * 1024 * 1024;
pub const PDF_TITLE_MIN_CHARS: usize = 5;
pub const PDF_TITLE_MAX_CHARS: usize = 200;
pub const PDF_DESCRIPTION_MAX_CHARS: usize = 1000;

const DEFAULT_EXTENSION: &str = "pdf";

/// Binary payload picked in the upload form.
#[derive(Clone, PartialEq, Eq)]
pub struct PdfFile {
    /// Original file name on the uploader's machine.
    pub file_name: String,
    /// Media type declared by the client; guessed from `file_name` when `None`.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl PdfFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Effective media type essence (parameters stripped, lowercase).
    ///
    /// A declared but empty type stays empty; only an undeclared type is
    /// guessed from the file name.
    pub fn media_type(&self) -> String {
        match self.content_type.as_deref() {
            Some(declared) => declared
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase(),
            None => mime_guess::from_path(&self.file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercase extension used for the stored object name.
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
    }
}

impl Debug for PdfFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

/// Admin "upload PDF" form as captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfInput {
    pub title: String,
    pub description: Option<String>,
    /// Subject picked from the select box, as its string identifier.
    pub subject_id: String,
    pub file: Option<PdfFile>,
}

/// Accepted PDF metadata, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfUpload {
    pub title: String,
    pub description: Option<String>,
    pub subject_id: SubjectId,
    pub file_name: String,
    pub extension: String,
    pub size_bytes: u64,
}

impl Validate for PdfInput {
    type Output = PdfUpload;

    fn validate(&self) -> Result<PdfUpload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = FieldCheck::trimmed("title", &self.title)
            .min_chars(PDF_TITLE_MIN_CHARS, "PDF title must be at least 5 characters")
            .max_chars(
                PDF_TITLE_MAX_CHARS,
                "PDF title must be less than 200 characters",
            )
            .finish(&mut errors);
        let description = check_description(
            self.description.as_deref(),
            PDF_DESCRIPTION_MAX_CHARS,
            "Description must be less than 1000 characters",
            &mut errors,
        );
        let subject_id = check_subject_id(&self.subject_id, &mut errors);
        check_file(self.file.as_ref(), &mut errors);

        let file = match (&self.file, errors.is_empty()) {
            (Some(file), true) => file,
            _ => return Err(errors),
        };

        Ok(PdfUpload {
            title: title.to_string(),
            description,
            subject_id,
            file_name: file.file_name.clone(),
            extension: file.extension(),
            size_bytes: file.size_bytes(),
        })
    }
}

fn check_file(file: Option<&PdfFile>, errors: &mut FieldErrors) {
    let Some(file) = file else {
        errors.push("file", "Please select a PDF file");
        return;
    };
    if file.media_type() != PDF_MEDIA_TYPE {
        errors.push("file", "File must be a PDF");
    } else if file.size_bytes() > PDF_MAX_BYTES {
        errors.push("file", "PDF must be less than 50MB");
    }
}

/// Row handed to the external store after the object upload succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPdfDocument {
    pub subject_id: SubjectId,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_size: u64,
    pub uploaded_by: Uuid,
}

/// PDF study material as stored by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfDocument {
    pub id: Uuid,
    pub subject_id: SubjectId,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_size: u64,
    pub uploaded_by: Uuid,
    pub created_at: i64,
}

impl PdfDocument {
    /// URL opened in a new tab for in-browser viewing.
    pub fn view_url(&self) -> &str {
        &self.file_url
    }

    /// File name suggested to the browser on download.
    pub fn download_name(&self) -> &str {
        &self.title
    }
}
