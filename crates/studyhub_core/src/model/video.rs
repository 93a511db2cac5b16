//! YouTube video model.

use crate::model::subject::SubjectId;
use crate::model::{check_description, check_subject_id};
use crate::validation::{is_web_url, FieldCheck, FieldErrors, Validate};
use crate::youtube;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const VIDEO_TITLE_MIN_CHARS: usize = 5;
pub const VIDEO_TITLE_MAX_CHARS: usize = 200;
pub const VIDEO_DESCRIPTION_MAX_CHARS: usize = 1000;

/// Admin "add video" form as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub subject_id: String,
    pub youtube_url: String,
}

/// Accepted video payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoLink {
    pub title: String,
    pub description: Option<String>,
    pub subject_id: SubjectId,
    pub youtube_url: String,
}

impl Validate for VideoInput {
    type Output = VideoLink;

    fn validate(&self) -> Result<VideoLink, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = FieldCheck::trimmed("title", &self.title)
            .min_chars(
                VIDEO_TITLE_MIN_CHARS,
                "Video title must be at least 5 characters",
            )
            .max_chars(
                VIDEO_TITLE_MAX_CHARS,
                "Video title must be less than 200 characters",
            )
            .finish(&mut errors);
        let description = check_description(
            self.description.as_deref(),
            VIDEO_DESCRIPTION_MAX_CHARS,
            "Description must be less than 1000 characters",
            &mut errors,
        );
        let subject_id = check_subject_id(&self.subject_id, &mut errors);
        let youtube_url = FieldCheck::trimmed("youtubeUrl", &self.youtube_url)
            .rule(is_web_url, "Invalid URL format")
            .rule(youtube::is_youtube_url, "Must be a valid YouTube URL")
            .finish(&mut errors);

        errors.into_result(|| VideoLink {
            title: title.to_string(),
            description,
            subject_id,
            youtube_url: youtube_url.to_string(),
        })
    }
}

/// Row handed to the external store for a registered video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVideo {
    pub subject_id: SubjectId,
    pub title: String,
    pub description: Option<String>,
    pub youtube_url: String,
    pub video_id: String,
    pub added_by: Uuid,
}

/// Video as stored by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: Uuid,
    pub subject_id: SubjectId,
    pub title: String,
    pub description: Option<String>,
    pub youtube_url: String,
    pub video_id: String,
    pub added_by: Uuid,
    pub created_at: i64,
}

impl VideoRecord {
    /// Iframe source for the embedded player.
    pub fn embed_url(&self) -> String {
        youtube::embed_url(&self.video_id)
    }
}
