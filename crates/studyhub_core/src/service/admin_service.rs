//! Admin dashboard controller.
//!
//! # Responsibility
//! - Add subjects, upload PDFs and register YouTube videos.
//! - Load the dashboard's subject list and contact inbox.
//!
//! # Invariants
//! - Every operation rejects non-admin actors with `FormError::Forbidden`
//!   before looking at the input.
//! - A PDF row is only inserted after its object upload succeeded.
//! - A stored video always carries the identifier extracted from its URL.

use crate::config::StorageConfig;
use crate::model::auth::AuthUser;
use crate::model::contact::ContactRecord;
use crate::model::pdf::{NewPdfDocument, PdfDocument, PdfInput, PDF_MEDIA_TYPE};
use crate::model::subject::{Subject, SubjectInput};
use crate::model::video::{NewVideo, VideoInput, VideoRecord};
use crate::service::{field_list, FormError, Notice, Submitted};
use crate::store::{ContactStore, MaterialStore, ObjectStorage, StoreError, SubjectStore};
use crate::validation::{FieldErrors, Validate};
use crate::youtube;
use log::{error, info, warn};
use uuid::Uuid;

/// Data behind the admin dashboard tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDashboard {
    /// Ordered by name, feeding the subject pickers.
    pub subjects: Vec<Subject>,
    /// Newest first.
    pub contacts: Vec<ContactRecord>,
}

pub struct AdminService<S, O> {
    store: S,
    storage: O,
    pdf_bucket: String,
}

impl<S, O> AdminService<S, O>
where
    S: SubjectStore + MaterialStore + ContactStore,
    O: ObjectStorage,
{
    pub fn new(store: S, storage: O, config: &StorageConfig) -> Self {
        Self {
            store,
            storage,
            pdf_bucket: config.pdf_bucket.trim().to_string(),
        }
    }

    pub fn dashboard(&self, actor: &AuthUser) -> Result<AdminDashboard, FormError> {
        require_admin(actor, "admin_dashboard")?;
        let subjects = self.store.list_subjects()?;
        let contacts = self.store.list_contacts()?;
        Ok(AdminDashboard { subjects, contacts })
    }

    pub fn add_subject(
        &self,
        actor: &AuthUser,
        input: &SubjectInput,
    ) -> Result<Submitted<Subject>, FormError> {
        require_admin(actor, "admin_add_subject")?;
        let subject = input
            .validate()
            .map_err(|errors| rejected("admin_add_subject", errors))?;

        let record = self
            .store
            .insert_subject(&subject)
            .map_err(|err| failed("admin_add_subject", err))?;

        info!(
            "event=admin_add_subject module=service status=ok id={}",
            record.id
        );
        Ok(Submitted {
            record,
            notice: Notice::success("Success", "Subject added successfully"),
        })
    }

    /// Uploads the file as `{uuid}.{ext}` into the PDF bucket, then records it.
    pub fn upload_pdf(
        &self,
        actor: &AuthUser,
        input: &PdfInput,
    ) -> Result<Submitted<PdfDocument>, FormError> {
        require_admin(actor, "admin_upload_pdf")?;
        let upload = input
            .validate()
            .map_err(|errors| rejected("admin_upload_pdf", errors))?;
        let Some(file) = input.file.as_ref() else {
            return Err(rejected(
                "admin_upload_pdf",
                FieldErrors::single("file", "Please select a PDF file"),
            ));
        };

        let object_path = format!("{}.{}", Uuid::new_v4(), upload.extension);
        self.storage
            .upload(&self.pdf_bucket, &object_path, &file.bytes, PDF_MEDIA_TYPE)
            .map_err(|err| failed("admin_upload_pdf", err))?;
        let file_url = self.storage.public_url(&self.pdf_bucket, &object_path);

        // A failed row insert leaves the uploaded object behind.
        let record = self
            .store
            .insert_pdf(&NewPdfDocument {
                subject_id: upload.subject_id,
                title: upload.title,
                description: upload.description,
                file_url,
                file_size: upload.size_bytes,
                uploaded_by: actor.id,
            })
            .map_err(|err| failed("admin_upload_pdf", err))?;

        info!(
            "event=admin_upload_pdf module=service status=ok id={} object_path={} size_bytes={}",
            record.id, object_path, record.file_size
        );
        Ok(Submitted {
            record,
            notice: Notice::success("Success", "PDF uploaded successfully"),
        })
    }

    pub fn add_video(
        &self,
        actor: &AuthUser,
        input: &VideoInput,
    ) -> Result<Submitted<VideoRecord>, FormError> {
        require_admin(actor, "admin_add_video")?;
        let link = input
            .validate()
            .map_err(|errors| rejected("admin_add_video", errors))?;
        let Some(video_id) = youtube::extract_video_id(&link.youtube_url) else {
            return Err(rejected(
                "admin_add_video",
                FieldErrors::single("youtubeUrl", "Invalid YouTube URL"),
            ));
        };

        let record = self
            .store
            .insert_video(&NewVideo {
                subject_id: link.subject_id,
                title: link.title.clone(),
                description: link.description.clone(),
                youtube_url: link.youtube_url.clone(),
                video_id: video_id.to_string(),
                added_by: actor.id,
            })
            .map_err(|err| failed("admin_add_video", err))?;

        info!(
            "event=admin_add_video module=service status=ok id={} video_id={}",
            record.id, record.video_id
        );
        Ok(Submitted {
            record,
            notice: Notice::success("Success", "Video added successfully"),
        })
    }
}

fn require_admin(actor: &AuthUser, event: &str) -> Result<(), FormError> {
    if actor.is_admin {
        return Ok(());
    }
    warn!(
        "event={} module=service status=forbidden user_id={}",
        event, actor.id
    );
    Err(FormError::Forbidden)
}

fn rejected(event: &str, errors: FieldErrors) -> FormError {
    warn!(
        "event={} module=service status=rejected fields={}",
        event,
        field_list(&errors)
    );
    FormError::Invalid(errors)
}

fn failed(event: &str, err: StoreError) -> FormError {
    error!(
        "event={} module=service status=error error_code={}",
        event,
        err.code()
    );
    FormError::Store(err)
}
