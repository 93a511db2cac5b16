//! YouTube video identifier extraction.
//!
//! # Responsibility
//! - Pull the 11-character video identifier out of watch, embed, `/v/`,
//!   short-link and channel/playlist-prefixed URLs.
//! - Build the embed/watch URLs the portal renders from a stored identifier.
//!
//! # Invariants
//! - Extraction never panics; an unrecognized input yields `None`.
//! - Identifiers are returned exactly as written (case-sensitive).
//! - `extract_video_id(&embed_url(id)) == Some(id)` for every extracted `id`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of every YouTube video identifier.
pub const VIDEO_ID_LEN: usize = 11;

const EMBED_BASE_URL: &str = "https://www.youtube.com/embed/";
const WATCH_BASE_URL: &str = "https://www.youtube.com/watch?v=";

static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("valid youtube id regex")
});

/// Extracts the video identifier from a YouTube URL.
///
/// The match is unanchored, so surrounding text is tolerated. The identifier
/// is the first run of 11 characters after the recognized prefix that
/// contains none of `"`, `&`, `?`, `/` or whitespace.
///
/// ```
/// use studyhub_core::youtube::extract_video_id;
///
/// assert_eq!(
///     extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
///     Some("dQw4w9WgXcQ")
/// );
/// assert_eq!(extract_video_id("https://example.com/video"), None);
/// ```
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// Returns whether `url` contains a recognizable YouTube video reference.
pub fn is_youtube_url(url: &str) -> bool {
    VIDEO_ID_RE.is_match(url)
}

/// Builds the iframe embed URL for a video identifier.
pub fn embed_url(video_id: &str) -> String {
    format!("{EMBED_BASE_URL}{video_id}")
}

/// Builds the canonical watch page URL for a video identifier.
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_BASE_URL}{video_id}")
}
