//! Core logic for the StudyHub portal.
//! Form validation, YouTube link parsing and the controllers that sit
//! between the UI and the hosted backend.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;
pub mod youtube;

pub use config::{ConfigError, PortalConfig, StorageConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::auth::{AuthUser, SignInInput, SignInRequest, SignUpInput, SignUpRequest};
pub use model::contact::{ContactInput, ContactMessage, ContactRecord};
pub use model::pdf::{NewPdfDocument, PdfDocument, PdfFile, PdfInput, PdfUpload};
pub use model::subject::{NewSubject, Subject, SubjectId, SubjectInput};
pub use model::video::{NewVideo, VideoInput, VideoLink, VideoRecord};
pub use service::admin_service::{AdminDashboard, AdminService};
pub use service::auth_service::AuthService;
pub use service::catalog_service::{filter_subjects, CatalogError, CatalogService, SubjectBrowser};
pub use service::contact_service::ContactService;
pub use service::{FormError, Notice, NoticeVariant, Submitted};
pub use store::{
    AuthProvider, ContactStore, InMemoryStore, MaterialStore, ObjectStorage, StoreError,
    StoreResult, SubjectStore,
};
pub use validation::{FieldErrors, FieldViolation, Validate};
pub use youtube::extract_video_id;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
