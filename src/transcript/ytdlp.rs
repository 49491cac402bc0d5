//! yt-dlp subtitle extraction.

use super::{PrimaryFailure, SubtitleArtifact, SubtitleExtractor, VideoId};
use crate::config::YoutubeSettings;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Writes English auto-generated subtitles via `yt-dlp --skip-download`.
pub struct YtDlpExtractor {
    program: String,
    language: String,
    timeout: Duration,
}

impl YtDlpExtractor {
    pub fn new(program: impl Into<String>, language: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            language: language.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &YoutubeSettings) -> Self {
        Self::new(
            settings.ytdlp_path.clone(),
            settings.subtitle_language.clone(),
            settings.tool_timeout(),
        )
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for YtDlpExtractor {
    fn default() -> Self {
        Self::from_settings(&YoutubeSettings::default())
    }
}

#[async_trait]
impl SubtitleExtractor for YtDlpExtractor {
    #[instrument(skip(self, artifact), fields(video_id = %video_id))]
    async fn extract(
        &self,
        video_id: &VideoId,
        artifact: &SubtitleArtifact,
    ) -> Result<(), PrimaryFailure> {
        let url = video_id.watch_url();
        debug!("Running {} for {}", self.program, url);

        // kill_on_drop reaps the child if the timeout fires or the request is cancelled.
        let run = Command::new(&self.program)
            .arg("--skip-download")
            .arg("--write-auto-sub")
            .arg("--sub-lang").arg(&self.language)
            .arg("--sub-format").arg("vtt")
            .arg(&url)
            .arg("-o").arg(artifact.stem())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, run).await {
            Err(_) => return Err(PrimaryFailure::Timeout(self.timeout)),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PrimaryFailure::ToolNotFound(self.program.clone()));
            }
            Ok(Err(e)) => return Err(PrimaryFailure::Spawn(e.to_string())),
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            return Err(PrimaryFailure::Exit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
