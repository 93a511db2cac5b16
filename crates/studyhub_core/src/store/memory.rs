//! In-process stand-in for the hosted backend.
//!
//! # Responsibility
//! - Back controllers and views in tests and local smoke runs.
//! - Reproduce the hosted service's observable rules: unique subject names,
//!   subject references on PDFs/videos, listing order, public object URLs.
//!
//! # Invariants
//! - `created_at` is strictly increasing across all inserts.
//! - Object paths are write-once per bucket.

use super::{ContactStore, MaterialStore, ObjectStorage, StoreError, StoreResult, SubjectStore};
use crate::config::StorageConfig;
use crate::model::contact::{ContactMessage, ContactRecord};
use crate::model::pdf::{NewPdfDocument, PdfDocument};
use crate::model::subject::{NewSubject, Subject, SubjectId};
use crate::model::video::{NewVideo, VideoRecord};
use log::debug;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const PUBLIC_OBJECT_PATH: &str = "storage/v1/object/public";

/// Object stored by [`InMemoryStore::upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
struct StoreState {
    subjects: Vec<Subject>,
    pdfs: Vec<PdfDocument>,
    videos: Vec<VideoRecord>,
    contacts: Vec<ContactRecord>,
    objects: BTreeMap<(String, String), StoredObject>,
    last_created_at: i64,
}

impl StoreState {
    fn next_created_at(&mut self) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or_default();
        self.last_created_at = now.max(self.last_created_at + 1);
        self.last_created_at
    }

    fn require_subject(&self, subject_id: SubjectId, table: &str) -> StoreResult<()> {
        if self.subjects.iter().any(|subject| subject.id == subject_id) {
            return Ok(());
        }
        Err(StoreError::Rejected(format!(
            "insert on table \"{table}\" violates foreign key constraint \"{table}_subject_id_fkey\""
        )))
    }
}

/// Thread-safe in-memory implementation of every table/storage seam.
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    public_base_url: String,
}

impl InMemoryStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.public_base_url.as_str())
    }

    /// Returns a stored object; unknown paths are `StoreError::NotFound`.
    pub fn object(&self, bucket: &str, path: &str) -> StoreResult<StoredObject> {
        let state = self.lock()?;
        state
            .objects
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound("Object not found".to_string()))
    }

    /// Number of objects across all buckets.
    pub fn object_count(&self) -> StoreResult<usize> {
        Ok(self.lock()?.objects.len())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::from_config(&StorageConfig::default())
    }
}

impl SubjectStore for InMemoryStore {
    fn insert_subject(&self, subject: &NewSubject) -> StoreResult<Subject> {
        let mut state = self.lock()?;
        if state
            .subjects
            .iter()
            .any(|existing| existing.name == subject.name)
        {
            return Err(StoreError::Conflict(
                "duplicate key value violates unique constraint \"subjects_name_key\"".to_string(),
            ));
        }

        let record = Subject {
            id: Uuid::new_v4(),
            name: subject.name.clone(),
            description: subject.description.clone(),
        };
        state.subjects.push(record.clone());
        debug!("event=store_insert module=store table=subjects id={}", record.id);
        Ok(record)
    }

    fn list_subjects(&self) -> StoreResult<Vec<Subject>> {
        let mut subjects = self.lock()?.subjects.clone();
        subjects.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(subjects)
    }
}

impl MaterialStore for InMemoryStore {
    fn insert_pdf(&self, pdf: &NewPdfDocument) -> StoreResult<PdfDocument> {
        let mut state = self.lock()?;
        state.require_subject(pdf.subject_id, "pdfs")?;

        let record = PdfDocument {
            id: Uuid::new_v4(),
            subject_id: pdf.subject_id,
            title: pdf.title.clone(),
            description: pdf.description.clone(),
            file_url: pdf.file_url.clone(),
            file_size: pdf.file_size,
            uploaded_by: pdf.uploaded_by,
            created_at: state.next_created_at(),
        };
        state.pdfs.push(record.clone());
        debug!("event=store_insert module=store table=pdfs id={}", record.id);
        Ok(record)
    }

    fn list_pdfs(&self, subject_id: SubjectId) -> StoreResult<Vec<PdfDocument>> {
        let state = self.lock()?;
        let mut pdfs: Vec<PdfDocument> = state
            .pdfs
            .iter()
            .filter(|pdf| pdf.subject_id == subject_id)
            .cloned()
            .collect();
        pdfs.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(pdfs)
    }

    fn insert_video(&self, video: &NewVideo) -> StoreResult<VideoRecord> {
        let mut state = self.lock()?;
        state.require_subject(video.subject_id, "youtube_videos")?;

        let record = VideoRecord {
            id: Uuid::new_v4(),
            subject_id: video.subject_id,
            title: video.title.clone(),
            description: video.description.clone(),
            youtube_url: video.youtube_url.clone(),
            video_id: video.video_id.clone(),
            added_by: video.added_by,
            created_at: state.next_created_at(),
        };
        state.videos.push(record.clone());
        debug!(
            "event=store_insert module=store table=youtube_videos id={}",
            record.id
        );
        Ok(record)
    }

    fn list_videos(&self, subject_id: SubjectId) -> StoreResult<Vec<VideoRecord>> {
        let state = self.lock()?;
        let mut videos: Vec<VideoRecord> = state
            .videos
            .iter()
            .filter(|video| video.subject_id == subject_id)
            .cloned()
            .collect();
        videos.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(videos)
    }
}

impl ContactStore for InMemoryStore {
    fn insert_contact(&self, message: &ContactMessage) -> StoreResult<ContactRecord> {
        let mut state = self.lock()?;
        let record = ContactRecord {
            id: Uuid::new_v4(),
            name: message.name.clone(),
            email: message.email.clone(),
            message: message.message.clone(),
            created_at: state.next_created_at(),
        };
        state.contacts.push(record.clone());
        debug!("event=store_insert module=store table=contacts id={}", record.id);
        Ok(record)
    }

    fn list_contacts(&self) -> StoreResult<Vec<ContactRecord>> {
        let mut contacts = self.lock()?.contacts.clone();
        contacts.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(contacts)
    }
}

impl ObjectStorage for InMemoryStore {
    fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> StoreResult<()> {
        let mut state = self.lock()?;
        let key = (bucket.to_string(), path.to_string());
        if state.objects.contains_key(&key) {
            return Err(StoreError::Conflict("The resource already exists".to_string()));
        }
        state.objects.insert(
            key,
            StoredObject {
                content_type: content_type.to_string(),
                bytes: bytes.to_vec(),
            },
        );
        debug!(
            "event=storage_upload module=store bucket={} path={} size_bytes={}",
            bucket,
            path,
            bytes.len()
        );
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/{PUBLIC_OBJECT_PATH}/{bucket}/{path}",
            self.public_base_url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryStore;
    use crate::model::contact::ContactMessage;
    use crate::model::subject::NewSubject;
    use crate::store::{ContactStore, ObjectStorage, StoreError, SubjectStore};

    fn subject(name: &str) -> NewSubject {
        NewSubject {
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn subjects_list_by_name_and_reject_duplicates() {
        let store = InMemoryStore::new("https://files.example.com/");
        store.insert_subject(&subject("Physics")).unwrap();
        store.insert_subject(&subject("Algebra")).unwrap();

        let names: Vec<String> = store
            .list_subjects()
            .unwrap()
            .into_iter()
            .map(|subject| subject.name)
            .collect();
        assert_eq!(names, vec!["Algebra", "Physics"]);

        let err = store.insert_subject(&subject("Physics")).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn contacts_list_newest_first() {
        let store = InMemoryStore::default();
        for name in ["First", "Second", "Third"] {
            store
                .insert_contact(&ContactMessage {
                    name: name.to_string(),
                    email: "user@example.com".to_string(),
                    message: "Hello there, portal".to_string(),
                })
                .unwrap();
        }
        let contacts = store.list_contacts().unwrap();
        assert_eq!(contacts[0].name, "Third");
        assert_eq!(contacts[2].name, "First");
        assert!(contacts[0].created_at > contacts[1].created_at);
    }

    #[test]
    fn uploads_are_write_once_with_public_urls() {
        let store = InMemoryStore::new("https://files.example.com/");
        store
            .upload("pdfs", "a.pdf", b"%PDF-1.7", "application/pdf")
            .unwrap();
        let err = store
            .upload("pdfs", "a.pdf", b"%PDF-1.7", "application/pdf")
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(
            store.public_url("pdfs", "a.pdf"),
            "https://files.example.com/storage/v1/object/public/pdfs/a.pdf"
        );
        let object = store.object("pdfs", "a.pdf").unwrap();
        assert_eq!(object.bytes, b"%PDF-1.7");
    }

    #[test]
    fn missing_objects_are_not_found() {
        let store = InMemoryStore::default();
        store
            .upload("pdfs", "a.pdf", b"%PDF-1.7", "application/pdf")
            .unwrap();

        let err = store.object("pdfs", "b.pdf").unwrap_err();
        assert_eq!(err, StoreError::NotFound("Object not found".to_string()));
        assert_eq!(err.code(), "not_found");
        assert!(store.object("videos", "a.pdf").is_err());
    }
}
