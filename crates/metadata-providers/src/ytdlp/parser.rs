use crate::{FormatEntry, FormatKind, SearchResults, VideoDetail, VideoId, VideoSummary};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected yt-dlp output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct RawSearch {
    #[serde(default)]
    entries: Vec<RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: Option<String>,
}

pub(crate) fn parse_search_results(raw: &[u8]) -> Result<SearchResults, ParseError> {
    let search: RawSearch = serde_json::from_slice(raw)?;

    let results = search
        .entries
        .into_iter()
        .filter_map(|entry| {
            let id: VideoId = entry.id.into();

            // Channels and playlists come back with differently shaped ids.
            if !id.is_canonical() {
                return None;
            }

            Some(VideoSummary {
                id,
                title: entry.title.unwrap_or_default(),
            })
        })
        .collect();

    Ok(results)
}

#[derive(Deserialize)]
struct RawVideo {
    #[serde(default)]
    title: String,
    #[serde(default)]
    formats: Vec<RawFormat>,
}

#[derive(Deserialize)]
struct RawFormat {
    #[serde(default)]
    format_id: Option<String>,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    resolution: Option<String>,
    #[serde(default)]
    format_note: Option<String>,
    #[serde(default)]
    filesize: Option<u64>,
    #[serde(default)]
    abr: Option<f64>,
    #[serde(default)]
    url: Option<String>,
}

pub(crate) fn parse_video_details(raw: &[u8]) -> Result<VideoDetail, ParseError> {
    let video: RawVideo = serde_json::from_slice(raw)?;

    let formats = video
        .formats
        .into_iter()
        .filter_map(|format| {
            // A format without a URL is not downloadable, skip it.
            let download_url = format.url?;

            let note = format.format_note.unwrap_or_default();
            let kind = if note.to_lowercase().contains("audio") {
                FormatKind::Audio
            } else {
                FormatKind::Video
            };
            let resolution = format
                .resolution
                .or_else(|| if note.is_empty() { None } else { Some(note) })
                .unwrap_or_else(|| "N/A".to_string());

            Some(FormatEntry {
                kind,
                format_id: format.format_id.unwrap_or_default(),
                resolution,
                extension: format.ext.unwrap_or_default(),
                size_bytes: format.filesize,
                bitrate_kbps: format.abr,
                download_url,
            })
        })
        .collect();

    Ok(VideoDetail {
        title: video.title,
        formats,
    })
}
