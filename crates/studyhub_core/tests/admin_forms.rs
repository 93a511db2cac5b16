use studyhub_core::model::pdf::PDF_MEDIA_TYPE;
use studyhub_core::{
    AdminService, AuthUser, ContactInput, ContactService, FormError, InMemoryStore,
    MaterialStore, PdfFile, PdfInput, StorageConfig, StoreError, SubjectInput, SubjectStore,
    VideoInput,
};
use uuid::Uuid;

fn admin() -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        full_name: Some("Portal Admin".to_string()),
        is_admin: true,
    }
}

fn student() -> AuthUser {
    AuthUser {
        is_admin: false,
        email: "student@example.com".to_string(),
        ..admin()
    }
}

fn storage_config() -> StorageConfig {
    StorageConfig {
        pdf_bucket: "pdfs".to_string(),
        public_base_url: "https://files.example.com".to_string(),
    }
}

fn subject_input(name: &str) -> SubjectInput {
    SubjectInput {
        name: name.to_string(),
        description: Some("Core topics".to_string()),
    }
}

fn pdf_input(subject_id: Uuid) -> PdfInput {
    PdfInput {
        title: "Derivatives cheat sheet".to_string(),
        description: None,
        subject_id: subject_id.to_string(),
        file: Some(
            PdfFile::new("Derivatives.PDF", b"%PDF-1.7 body".to_vec())
                .with_content_type("application/pdf"),
        ),
    }
}

fn video_input(subject_id: Uuid, url: &str) -> VideoInput {
    VideoInput {
        title: "Chain rule explained".to_string(),
        description: Some("  ".to_string()),
        subject_id: subject_id.to_string(),
        youtube_url: url.to_string(),
    }
}

#[test]
fn non_admins_are_rejected_before_validation() {
    let store = InMemoryStore::default();
    let admin_service = AdminService::new(&store, &store, &storage_config());
    let actor = student();

    let err = admin_service
        .add_subject(&actor, &subject_input(""))
        .unwrap_err();
    assert_eq!(err, FormError::Forbidden);
    assert_eq!(err.notice().title, "Access denied");

    assert_eq!(
        admin_service.upload_pdf(&actor, &PdfInput::default()),
        Err(FormError::Forbidden)
    );
    assert_eq!(
        admin_service.add_video(&actor, &VideoInput::default()),
        Err(FormError::Forbidden)
    );
    assert_eq!(admin_service.dashboard(&actor), Err(FormError::Forbidden));
}

#[test]
fn add_subject_trims_and_rejects_duplicates() {
    let store = InMemoryStore::default();
    let admin_service = AdminService::new(&store, &store, &storage_config());
    let actor = admin();

    let created = admin_service
        .add_subject(&actor, &subject_input("  Calculus  "))
        .unwrap();
    assert_eq!(created.record.name, "Calculus");
    assert_eq!(created.notice.description, "Subject added successfully");

    let err = admin_service
        .add_subject(&actor, &subject_input("Calculus"))
        .unwrap_err();
    assert!(matches!(err, FormError::Store(StoreError::Conflict(_))));
    assert_eq!(store.list_subjects().unwrap().len(), 1);
}

#[test]
fn upload_pdf_stores_object_then_row() {
    let store = InMemoryStore::new("https://files.example.com");
    let admin_service = AdminService::new(&store, &store, &storage_config());
    let actor = admin();
    let subject = admin_service
        .add_subject(&actor, &subject_input("Calculus"))
        .unwrap()
        .record;

    let uploaded = admin_service
        .upload_pdf(&actor, &pdf_input(subject.id))
        .unwrap();
    let record = uploaded.record;
    assert_eq!(record.subject_id, subject.id);
    assert_eq!(record.title, "Derivatives cheat sheet");
    assert_eq!(record.file_size, 13);
    assert_eq!(record.uploaded_by, actor.id);
    assert_eq!(record.description, None);
    assert_eq!(uploaded.notice.description, "PDF uploaded successfully");

    let prefix = "https://files.example.com/storage/v1/object/public/pdfs/";
    let object_path = record.file_url.strip_prefix(prefix).unwrap();
    assert!(object_path.ends_with(".pdf"));
    let object = store.object("pdfs", object_path).unwrap();
    assert_eq!(object.bytes, b"%PDF-1.7 body");
    assert_eq!(object.content_type, PDF_MEDIA_TYPE);

    assert_eq!(store.list_pdfs(subject.id).unwrap(), vec![record]);
}

#[test]
fn invalid_pdf_uploads_nothing() {
    let store = InMemoryStore::default();
    let admin_service = AdminService::new(&store, &store, &storage_config());
    let actor = admin();
    let subject = admin_service
        .add_subject(&actor, &subject_input("Calculus"))
        .unwrap()
        .record;

    let mut input = pdf_input(subject.id);
    input.file = Some(PdfFile::new("notes.docx", vec![1, 2, 3]));
    let err = admin_service.upload_pdf(&actor, &input).unwrap_err();
    assert_eq!(
        err.field_errors().unwrap().get("file"),
        Some("File must be a PDF")
    );
    assert_eq!(store.object_count().unwrap(), 0);
    assert!(store.list_pdfs(subject.id).unwrap().is_empty());
}

#[test]
fn pdf_for_unknown_subject_is_rejected_upstream() {
    let store = InMemoryStore::default();
    let admin_service = AdminService::new(&store, &store, &storage_config());

    let err = admin_service
        .upload_pdf(&admin(), &pdf_input(Uuid::new_v4()))
        .unwrap_err();
    assert!(matches!(err, FormError::Store(StoreError::Rejected(_))));
    assert!(err.notice().description.contains("foreign key"));
}

#[test]
fn add_video_stores_extracted_identifier() {
    let store = InMemoryStore::default();
    let admin_service = AdminService::new(&store, &store, &storage_config());
    let actor = admin();
    let subject = admin_service
        .add_subject(&actor, &subject_input("Calculus"))
        .unwrap()
        .record;

    let added = admin_service
        .add_video(
            &actor,
            &video_input(subject.id, "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"),
        )
        .unwrap();
    let record = added.record;
    assert_eq!(record.video_id, "dQw4w9WgXcQ");
    assert_eq!(
        record.youtube_url,
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"
    );
    assert_eq!(record.description, None);
    assert_eq!(record.added_by, actor.id);
    assert_eq!(
        record.embed_url(),
        "https://www.youtube.com/embed/dQw4w9WgXcQ"
    );
    assert_eq!(added.notice.description, "Video added successfully");
}

#[test]
fn add_video_rejects_non_youtube_links() {
    let store = InMemoryStore::default();
    let admin_service = AdminService::new(&store, &store, &storage_config());
    let actor = admin();
    let subject = admin_service
        .add_subject(&actor, &subject_input("Calculus"))
        .unwrap()
        .record;

    let err = admin_service
        .add_video(&actor, &video_input(subject.id, "https://vimeo.com/123456789"))
        .unwrap_err();
    assert_eq!(
        err.field_errors().unwrap().get("youtubeUrl"),
        Some("Must be a valid YouTube URL")
    );
    assert!(store.list_videos(subject.id).unwrap().is_empty());
}

#[test]
fn dashboard_lists_subjects_and_newest_contacts() {
    let store = InMemoryStore::default();
    let admin_service = AdminService::new(&store, &store, &storage_config());
    let contact_service = ContactService::new(&store);
    let actor = admin();

    for name in ["Physics", "Algebra"] {
        admin_service
            .add_subject(&actor, &subject_input(name))
            .unwrap();
    }
    for name in ["Early Sender", "Late Sender"] {
        contact_service
            .submit(&ContactInput {
                name: name.to_string(),
                email: "sender@example.com".to_string(),
                message: "Please add more exercises.".to_string(),
            })
            .unwrap();
    }

    let dashboard = admin_service.dashboard(&actor).unwrap();
    let subjects: Vec<&str> = dashboard
        .subjects
        .iter()
        .map(|subject| subject.name.as_str())
        .collect();
    assert_eq!(subjects, vec!["Algebra", "Physics"]);
    assert_eq!(dashboard.contacts[0].name, "Late Sender");
    assert_eq!(dashboard.contacts[1].name, "Early Sender");
}
