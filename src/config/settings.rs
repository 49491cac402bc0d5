//! Configuration settings for vidsum.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable consulted when `summary.api_key` is not set.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub summary: SummarySettings,
    pub server: ServerSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for temporary subtitle files.
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/vidsum".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Transcript acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Path or name of the yt-dlp executable.
    pub ytdlp_path: String,
    /// Language code for auto-generated subtitles.
    pub subtitle_language: String,
    /// Upper bound on a single yt-dlp run, in seconds.
    pub tool_timeout_seconds: u64,
    /// Preferred languages for the transcript API fallback.
    pub transcript_languages: Vec<String>,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            ytdlp_path: "yt-dlp".to_string(),
            subtitle_language: "en".to_string(),
            tool_timeout_seconds: 120,
            transcript_languages: vec!["en".to_string()],
        }
    }
}

impl YoutubeSettings {
    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_seconds)
    }
}

/// Generative summary settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    /// Gemini API key. Falls back to `GEMINI_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Base URL of the generative language API.
    pub endpoint: String,
    /// Model name used in the `generateContent` path.
    pub model: String,
    /// Prompt template; `{{text}}` is replaced with the transcript.
    pub prompt: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            prompt: "Summarize this transcript into a **concise summary** with key points:\n\n{{text}}"
                .to_string(),
            timeout_seconds: 300,
        }
    }
}

impl SummarySettings {
    /// Resolve the API key from config, then the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Render the prompt template for the given transcript text.
    pub fn render_prompt(&self, text: &str) -> String {
        self.prompt.replace("{{text}}", text)
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidsum")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }
}
