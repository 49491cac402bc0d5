//! Transcript API fallback backed by `yt-transcript-rs`.

use super::{FetchError, TranscriptEntry, TranscriptFetcher, VideoId};
use crate::config::YoutubeSettings;
use async_trait::async_trait;
use tracing::{debug, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

/// Fetches published or auto-generated transcripts through YouTube's
/// transcript endpoints.
pub struct TranscriptApiFetcher {
    languages: Vec<String>,
}

impl TranscriptApiFetcher {
    pub fn new(languages: Vec<String>) -> Self {
        Self { languages }
    }

    pub fn from_settings(settings: &YoutubeSettings) -> Self {
        Self::new(settings.transcript_languages.clone())
    }
}

impl Default for TranscriptApiFetcher {
    fn default() -> Self {
        Self::new(vec!["en".to_string()])
    }
}

fn classify(err: CouldNotRetrieveTranscript) -> FetchError {
    match &err.reason {
        Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled { .. }) => {
            FetchError::TranscriptsDisabled
        }
        Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }) => {
            FetchError::NoTranscriptFound
        }
        _ => FetchError::Other(err.to_string()),
    }
}

#[async_trait]
impl TranscriptFetcher for TranscriptApiFetcher {
    #[instrument(skip(self), fields(video_id = %video_id))]
    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<TranscriptEntry>, FetchError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| FetchError::Client(e.to_string()))?;

        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();
        let transcript = api
            .fetch_transcript(video_id.as_str(), &languages, false)
            .await
            .map_err(classify)?;

        debug!("Fetched {} transcript snippets", transcript.snippets.len());

        Ok(transcript
            .snippets
            .into_iter()
            .map(|s| TranscriptEntry {
                text: s.text,
                start: s.start,
                duration: s.duration,
            })
            .collect())
    }
}
