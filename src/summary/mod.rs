//! Transcript summarization through the Gemini `generateContent` API.

mod gemini;

pub use gemini::{extract_summary, GeminiSummarizer, FALLBACK_SUMMARY};

use thiserror::Error;

/// Summary failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// The text to summarize was empty or whitespace only.
    #[error("Missing or empty \"text\" in request body")]
    InvalidInput,

    /// Transport, HTTP status or body decoding failure.
    #[error("{0}")]
    UpstreamFailure(String),
}
