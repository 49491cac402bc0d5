//! Transcript acquisition for vidsum.
//!
//! A transcript is resolved in two steps: yt-dlp writes English auto-generated
//! subtitles to a temporary WebVTT file, and if that fails for any reason the
//! transcript API is queried instead. See [`Resolver`] for the full flow.

mod api;
mod artifact;
mod resolver;
mod vtt;
mod ytdlp;

pub use api::TranscriptApiFetcher;
pub use artifact::SubtitleArtifact;
pub use resolver::Resolver;
pub use vtt::{parse_vtt, Cue};
pub use ytdlp::YtDlpExtractor;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

/// Opaque, non-empty video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Wrap a caller-supplied identifier, rejecting empty input.
    pub fn new(raw: &str) -> Result<Self, TranscriptError> {
        if raw.trim().is_empty() {
            return Err(TranscriptError::MissingVideoId);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Watch URL handed to yt-dlp.
    pub fn watch_url(&self) -> String {
        url::Url::parse_with_params("https://www.youtube.com/watch", &[("v", self.0.as_str())])
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("https://www.youtube.com/watch?v={}", self.0))
    }

    /// Identifier reduced to characters that are safe inside a file name.
    pub fn file_stem(&self) -> String {
        self.0
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect()
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract an 11-character YouTube video ID from a URL or bare ID.
///
/// Accepts watch, youtu.be, embed, v/ and shorts URLs.
pub fn extract_video_id(input: &str) -> Option<String> {
    static VIDEO_ID: OnceLock<Regex> = OnceLock::new();
    let re = VIDEO_ID.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex")
    });

    let caps = re.captures(input.trim())?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// One entry returned by the transcript API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub text: String,
    /// Start offset in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

/// Caller-visible transcript failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscriptError {
    #[error("Video ID is required")]
    MissingVideoId,

    #[error("Transcripts are disabled for this video")]
    TranscriptsDisabled,

    #[error("No transcript found for this video")]
    NoTranscriptFound,

    #[error("{0}")]
    ToolFailure(String),

    #[error("{0}")]
    Unknown(String),
}

impl TranscriptError {
    /// Whether the failure is attributable to the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TranscriptError::MissingVideoId
                | TranscriptError::TranscriptsDisabled
                | TranscriptError::NoTranscriptFound
        )
    }
}

/// Reasons the subtitle extractor did not produce usable text.
///
/// Never surfaced to callers; the resolver logs these and falls back.
#[derive(Error, Debug)]
pub enum PrimaryFailure {
    #[error("{0} not found in PATH")]
    ToolNotFound(String),

    #[error("failed to run subtitle tool: {0}")]
    Spawn(String),

    #[error("subtitle tool exited with {code:?}: {stderr}")]
    Exit { code: Option<i32>, stderr: String },

    #[error("subtitle tool timed out after {0:?}")]
    Timeout(Duration),

    #[error("subtitle file not generated: {0}")]
    MissingArtifact(PathBuf),

    #[error("subtitle file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed subtitle file: {0}")]
    Malformed(String),
}

/// Failures reported by a [`TranscriptFetcher`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("transcripts are disabled")]
    TranscriptsDisabled,

    #[error("no transcript found")]
    NoTranscriptFound,

    #[error("transcript client unavailable: {0}")]
    Client(String),

    #[error("{0}")]
    Other(String),
}

impl From<FetchError> for TranscriptError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::TranscriptsDisabled => TranscriptError::TranscriptsDisabled,
            FetchError::NoTranscriptFound => TranscriptError::NoTranscriptFound,
            FetchError::Client(msg) => TranscriptError::ToolFailure(msg),
            FetchError::Other(msg) => TranscriptError::Unknown(msg),
        }
    }
}

/// Primary strategy: an external tool that writes a subtitle file.
#[async_trait]
pub trait SubtitleExtractor: Send + Sync {
    /// Write subtitles for `video_id` to `artifact.path()`.
    ///
    /// Returning `Ok` only means the tool reported success; the resolver
    /// still checks that the file exists.
    async fn extract(
        &self,
        video_id: &VideoId,
        artifact: &SubtitleArtifact,
    ) -> Result<(), PrimaryFailure>;
}

/// Secondary strategy: a library call returning ordered transcript entries.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<TranscriptEntry>, FetchError>;
}
