mod ytdlp;

use serde::{Deserialize, Serialize};
use std::ops::Deref;

pub use ytdlp::*;

/// Canonical length of a YouTube video identifier. Search results whose id
/// has a different length are non-video entries (channels, playlists).
pub const VIDEO_ID_LENGTH: usize = 11;

#[derive(Eq, PartialEq, Clone, Hash, Debug, Serialize, Deserialize)]
pub struct VideoId(pub(crate) String);

impl VideoId {
    pub fn is_canonical(&self) -> bool {
        self.0.len() == VIDEO_ID_LENGTH
    }
}

impl Into<VideoId> for String {
    fn into(self) -> VideoId {
        VideoId(self)
    }
}

impl Into<VideoId> for &str {
    fn into(self) -> VideoId {
        VideoId(self.to_string())
    }
}

impl Deref for VideoId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, PartialEq)]
pub struct VideoSummary {
    pub id: VideoId,
    pub title: String,
}

/// Search results in the provider's relevance ordering.
pub type SearchResults = Vec<VideoSummary>;

#[derive(Debug, PartialEq)]
pub struct VideoDetail {
    pub title: String,
    pub formats: Vec<FormatEntry>,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum FormatKind {
    Audio,
    Video,
}

#[derive(Debug, PartialEq)]
pub struct FormatEntry {
    pub kind: FormatKind,
    pub format_id: String,
    /// Resolution when the provider reports one, otherwise its format note.
    pub resolution: String,
    pub extension: String,
    pub size_bytes: Option<u64>,
    pub bitrate_kbps: Option<f64>,
    pub download_url: String,
}
