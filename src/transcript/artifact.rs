//! Scoped ownership of the temporary subtitle file.

use super::VideoId;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// The subtitle file written by yt-dlp for one resolution.
///
/// The path carries a per-resolution UUID so concurrent requests for the same
/// video never share a file. Dropping the artifact removes the file if it
/// exists; removal errors are logged and otherwise ignored.
#[derive(Debug)]
pub struct SubtitleArtifact {
    stem: PathBuf,
    path: PathBuf,
}

impl SubtitleArtifact {
    /// Compute `<dir>/temp.<id>.<uuid>.<lang>.vtt`.
    pub fn new(dir: &Path, video_id: &VideoId, language: &str) -> Self {
        let stem = dir.join(format!("temp.{}.{}", video_id.file_stem(), Uuid::new_v4().simple()));
        let mut file_name = stem.as_os_str().to_owned();
        file_name.push(format!(".{language}.vtt"));

        Self {
            stem,
            path: PathBuf::from(file_name),
        }
    }

    /// Output template passed to yt-dlp with `-o`.
    pub fn stem(&self) -> &Path {
        &self.stem
    }

    /// Where yt-dlp writes the subtitles.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Drop for SubtitleArtifact {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed subtitle file {:?}", self.path),
            Err(e) => warn!("Failed to remove subtitle file {:?}: {}", self.path, e),
        }
    }
}
