use studyhub_core::{
    CatalogError, CatalogService, InMemoryStore, MaterialStore, NewPdfDocument, NewSubject,
    NewVideo, PdfDocument, StoreError, StoreResult, Subject, SubjectId, SubjectStore,
    VideoRecord,
};
use uuid::Uuid;

fn seed_subject(store: &InMemoryStore, name: &str) -> Subject {
    store
        .insert_subject(&NewSubject {
            name: name.to_string(),
            description: None,
        })
        .unwrap()
}

fn seed_pdf(store: &InMemoryStore, subject_id: SubjectId, title: &str) -> PdfDocument {
    store
        .insert_pdf(&NewPdfDocument {
            subject_id,
            title: title.to_string(),
            description: None,
            file_url: format!("https://files.example.com/{title}.pdf"),
            file_size: 1024,
            uploaded_by: Uuid::new_v4(),
        })
        .unwrap()
}

fn seed_video(store: &InMemoryStore, subject_id: SubjectId, video_id: &str) -> VideoRecord {
    store
        .insert_video(&NewVideo {
            subject_id,
            title: format!("Lecture {video_id}"),
            description: None,
            youtube_url: format!("https://youtu.be/{video_id}"),
            video_id: video_id.to_string(),
            added_by: Uuid::new_v4(),
        })
        .unwrap()
}

#[test]
fn browse_orders_by_name_and_selects_first() {
    let store = InMemoryStore::default();
    seed_subject(&store, "Physics");
    let algebra = seed_subject(&store, "Algebra");
    seed_subject(&store, "Linear Algebra");
    let catalog = CatalogService::new(&store);

    let mut browser = catalog.browse().unwrap();
    assert_eq!(browser.selected, Some(algebra.id));

    browser.search("ALGEBRA");
    let visible: Vec<&str> = browser
        .visible()
        .into_iter()
        .map(|subject| subject.name.as_str())
        .collect();
    assert_eq!(visible, vec!["Algebra", "Linear Algebra"]);
}

#[test]
fn materials_are_scoped_to_subject_and_newest_first() {
    let store = InMemoryStore::default();
    let algebra = seed_subject(&store, "Algebra");
    let physics = seed_subject(&store, "Physics");
    seed_pdf(&store, algebra.id, "Groups");
    seed_pdf(&store, physics.id, "Optics");
    seed_pdf(&store, algebra.id, "Rings");
    seed_video(&store, algebra.id, "aaaaaaaaaaa");
    seed_video(&store, algebra.id, "bbbbbbbbbbb");
    let catalog = CatalogService::new(&store);

    let pdfs = catalog.pdfs_for(algebra.id).unwrap();
    let titles: Vec<&str> = pdfs.iter().map(|pdf| pdf.title.as_str()).collect();
    assert_eq!(titles, vec!["Rings", "Groups"]);
    assert_eq!(pdfs[0].view_url(), "https://files.example.com/Rings.pdf");
    assert_eq!(pdfs[0].download_name(), "Rings");

    let videos = catalog.videos_for(algebra.id).unwrap();
    assert_eq!(videos[0].video_id, "bbbbbbbbbbb");
    assert_eq!(
        videos[1].embed_url(),
        "https://www.youtube.com/embed/aaaaaaaaaaa"
    );
    assert!(catalog.videos_for(physics.id).unwrap().is_empty());
}

/// Store whose reads always fail.
struct OfflineStore;

impl SubjectStore for OfflineStore {
    fn insert_subject(&self, _subject: &NewSubject) -> StoreResult<Subject> {
        Err(offline())
    }

    fn list_subjects(&self) -> StoreResult<Vec<Subject>> {
        Err(offline())
    }
}

impl MaterialStore for OfflineStore {
    fn insert_pdf(&self, _pdf: &NewPdfDocument) -> StoreResult<PdfDocument> {
        Err(offline())
    }

    fn list_pdfs(&self, _subject_id: SubjectId) -> StoreResult<Vec<PdfDocument>> {
        Err(offline())
    }

    fn insert_video(&self, _video: &NewVideo) -> StoreResult<VideoRecord> {
        Err(offline())
    }

    fn list_videos(&self, _subject_id: SubjectId) -> StoreResult<Vec<VideoRecord>> {
        Err(offline())
    }
}

fn offline() -> StoreError {
    StoreError::Unavailable("Failed to fetch".to_string())
}

#[test]
fn load_failures_map_to_view_notices() {
    let catalog = CatalogService::new(OfflineStore);

    let err = catalog.browse().unwrap_err();
    assert!(matches!(err, CatalogError::Subjects(_)));
    assert_eq!(err.notice().description, "Failed to load subjects");

    let err = catalog.pdfs_for(Uuid::new_v4()).unwrap_err();
    assert_eq!(err.notice().description, "Failed to load PDFs");

    let err = catalog.videos_for(Uuid::new_v4()).unwrap_err();
    assert_eq!(err.notice().description, "Failed to load videos");
    assert!(err.notice().is_error());
}
