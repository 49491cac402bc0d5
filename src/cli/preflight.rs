//! Pre-flight checks before network-bound operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::{Settings, API_KEY_ENV};
use crate::error::{Result, VidsumError};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Transcripts work without yt-dlp (API fallback), but lose fidelity.
    Transcript,
    /// Summaries require an API key.
    Summarize,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Transcript => check_tool(&settings.youtube.ytdlp_path),
        Operation::Summarize => check_api_key(settings),
    }
}

/// Check if a Gemini API key is configured.
pub fn check_api_key(settings: &Settings) -> Result<()> {
    match settings.summary.resolved_api_key() {
        Some(_) => Ok(()),
        None => Err(VidsumError::Config(format!(
            "No Gemini API key. Set summary.api_key or export {API_KEY_ENV}='...'"
        ))),
    }
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(VidsumError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(VidsumError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(VidsumError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
