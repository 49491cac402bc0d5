//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{extract_video_id, Resolver};
use anyhow::Result;

/// Resolve one video's transcript and print it to stdout.
pub async fn run_transcript(video: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Transcript, &settings) {
        Output::warning(&format!("{}; using the transcript API only.", e));
    }

    // Accept full URLs; anything that is not recognisably YouTube is passed through.
    let video_id = extract_video_id(video).unwrap_or_else(|| video.trim().to_string());

    let resolver = Resolver::from_settings(&settings);
    let spinner = Output::spinner(&format!("Fetching transcript for {}...", video_id));
    let result = resolver.resolve(&video_id).await;
    spinner.finish_and_clear();

    match result {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to fetch transcript: {}", e));
            Err(e.into())
        }
    }
}
