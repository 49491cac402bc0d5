//! vidsum - YouTube transcripts and summaries
//!
//! Fetches a video's transcript and optionally summarizes it with Gemini.
//!
//! # Overview
//!
//! Transcripts are resolved with a fallback:
//! - yt-dlp writes English auto-generated subtitles to a temporary WebVTT file,
//!   whose cues are joined into plain text
//! - if yt-dlp fails in any way, the transcript API is queried instead
//! - the temporary file is removed whichever path was taken
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `transcript` - Transcript resolution (yt-dlp, transcript API, WebVTT parsing)
//! - `summary` - Gemini summaries
//! - `cli` - Command line interface and HTTP server
//!
//! # Example
//!
//! ```rust,no_run
//! use vidsum::config::Settings;
//! use vidsum::transcript::Resolver;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let resolver = Resolver::from_settings(&settings);
//!
//!     let text = resolver.resolve("dQw4w9WgXcQ").await?;
//!     println!("{}", text);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod summary;
pub mod transcript;

pub use error::{Result, VidsumError};
