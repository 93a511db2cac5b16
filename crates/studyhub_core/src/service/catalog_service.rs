//! Subject, PDF and video browsing views.
//!
//! # Invariants
//! - Subject search is a case-insensitive substring match on the name.
//! - The default selection is the first subject by name, independent of the
//!   current search text.

use crate::model::pdf::PdfDocument;
use crate::model::subject::{Subject, SubjectId};
use crate::model::video::VideoRecord;
use crate::service::Notice;
use crate::store::{MaterialStore, StoreError, SubjectStore};
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Load failure for a browsing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Subjects(StoreError),
    Pdfs(StoreError),
    Videos(StoreError),
}

impl CatalogError {
    pub fn notice(&self) -> Notice {
        let description = match self {
            Self::Subjects(_) => "Failed to load subjects",
            Self::Pdfs(_) => "Failed to load PDFs",
            Self::Videos(_) => "Failed to load videos",
        };
        Notice::failure("Error", description)
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Subjects(err) => write!(f, "failed to load subjects: {err}"),
            Self::Pdfs(err) => write!(f, "failed to load PDFs: {err}"),
            Self::Videos(err) => write!(f, "failed to load videos: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Subjects(err) | Self::Pdfs(err) | Self::Videos(err) => Some(err),
        }
    }
}

/// Subject sidebar state for the Subjects and Videos pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectBrowser {
    /// Every subject, ordered by name.
    pub subjects: Vec<Subject>,
    /// Lowercased search text currently applied.
    pub query: String,
    pub selected: Option<SubjectId>,
}

impl SubjectBrowser {
    pub fn new(subjects: Vec<Subject>) -> Self {
        let selected = subjects.first().map(|subject| subject.id);
        Self {
            subjects,
            query: String::new(),
            selected,
        }
    }

    pub fn search(&mut self, query: &str) {
        self.query = query.to_lowercase();
    }

    /// Subjects matching the current search, in name order.
    pub fn visible(&self) -> Vec<&Subject> {
        filter_subjects(&self.subjects, &self.query)
    }

    /// Selects a known subject; unknown ids leave the selection unchanged.
    pub fn select(&mut self, subject_id: SubjectId) -> bool {
        let known = self.subjects.iter().any(|subject| subject.id == subject_id);
        if known {
            self.selected = Some(subject_id);
        }
        known
    }

    pub fn selected_subject(&self) -> Option<&Subject> {
        let selected = self.selected?;
        self.subjects.iter().find(|subject| subject.id == selected)
    }
}

/// Case-insensitive substring filter over subject names.
///
/// An empty query keeps every subject.
pub fn filter_subjects<'a>(subjects: &'a [Subject], query: &str) -> Vec<&'a Subject> {
    let needle = query.to_lowercase();
    subjects
        .iter()
        .filter(|subject| subject.name.to_lowercase().contains(&needle))
        .collect()
}

/// Read-only views over subjects and their study materials.
pub struct CatalogService<S> {
    store: S,
}

impl<S> CatalogService<S>
where
    S: SubjectStore + MaterialStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the subject sidebar with the first subject preselected.
    pub fn browse(&self) -> Result<SubjectBrowser, CatalogError> {
        let subjects = self.store.list_subjects().map_err(|err| {
            error!(
                "event=catalog_subjects module=service status=error error_code={}",
                err.code()
            );
            CatalogError::Subjects(err)
        })?;
        Ok(SubjectBrowser::new(subjects))
    }

    /// PDFs of one subject, newest first.
    pub fn pdfs_for(&self, subject_id: SubjectId) -> Result<Vec<PdfDocument>, CatalogError> {
        self.store.list_pdfs(subject_id).map_err(|err| {
            error!(
                "event=catalog_pdfs module=service status=error subject_id={} error_code={}",
                subject_id,
                err.code()
            );
            CatalogError::Pdfs(err)
        })
    }

    /// Videos of one subject, newest first.
    pub fn videos_for(&self, subject_id: SubjectId) -> Result<Vec<VideoRecord>, CatalogError> {
        self.store.list_videos(subject_id).map_err(|err| {
            error!(
                "event=catalog_videos module=service status=error subject_id={} error_code={}",
                subject_id,
                err.code()
            );
            CatalogError::Videos(err)
        })
    }
}
