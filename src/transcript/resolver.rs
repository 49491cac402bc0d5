//! Transcript resolution with yt-dlp first and the transcript API as fallback.

use super::{
    parse_vtt, PrimaryFailure, SubtitleArtifact, SubtitleExtractor, TranscriptApiFetcher,
    TranscriptError, TranscriptFetcher, VideoId, YtDlpExtractor,
};
use crate::config::Settings;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Resolves a video identifier to plain transcript text.
///
/// Each call runs the subtitle extractor once, falls back to the transcript
/// fetcher on any extractor failure, and removes the subtitle file before
/// returning. Extractor failures are never reported to the caller.
#[derive(Clone)]
pub struct Resolver {
    extractor: Arc<dyn SubtitleExtractor>,
    fetcher: Arc<dyn TranscriptFetcher>,
    temp_dir: PathBuf,
    language: String,
}

impl Resolver {
    pub fn new(
        extractor: Arc<dyn SubtitleExtractor>,
        fetcher: Arc<dyn TranscriptFetcher>,
        temp_dir: PathBuf,
        language: impl Into<String>,
    ) -> Self {
        Self {
            extractor,
            fetcher,
            temp_dir,
            language: language.into(),
        }
    }

    /// Build a resolver using yt-dlp and the transcript API.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(YtDlpExtractor::from_settings(&settings.youtube)),
            Arc::new(TranscriptApiFetcher::from_settings(&settings.youtube)),
            settings.temp_dir(),
            settings.youtube.subtitle_language.clone(),
        )
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, video_id: &str) -> Result<String, TranscriptError> {
        let video_id = VideoId::new(video_id)?;
        info!("Resolving transcript");

        // Dropping the artifact removes the subtitle file on every exit path.
        let artifact = SubtitleArtifact::new(&self.temp_dir, &video_id, &self.language);

        match self.via_subtitles(&video_id, &artifact).await {
            Ok(text) => {
                info!("Transcript fetched via yt-dlp: {}...", preview(&text));
                return Ok(text);
            }
            Err(e) => warn!("yt-dlp failed: {}, falling back to transcript API", e),
        }

        match self.fetcher.fetch(&video_id).await {
            Ok(entries) => {
                let text = entries
                    .iter()
                    .map(|e| e.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                info!("Transcript fetched via transcript API: {}...", preview(&text));
                Ok(text)
            }
            Err(e) => {
                let err = TranscriptError::from(e);
                error!("Transcript API failed: {}", err);
                Err(err)
            }
        }
    }

    async fn via_subtitles(
        &self,
        video_id: &VideoId,
        artifact: &SubtitleArtifact,
    ) -> Result<String, PrimaryFailure> {
        tokio::fs::create_dir_all(&self.temp_dir).await?;

        self.extractor.extract(video_id, artifact).await?;

        if !artifact.exists() {
            return Err(PrimaryFailure::MissingArtifact(artifact.path().to_path_buf()));
        }

        let content = tokio::fs::read_to_string(artifact.path()).await?;
        let cues = parse_vtt(&content).map_err(PrimaryFailure::Malformed)?;

        Ok(cues
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}

fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}
