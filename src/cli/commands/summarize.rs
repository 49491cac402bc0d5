//! Summarize command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::summary::GeminiSummarizer;
use anyhow::Result;
use tokio::io::AsyncReadExt;

/// Summarize the given text, or stdin when no text is passed.
pub async fn run_summarize(text: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Summarize, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'vidsum doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let summarizer = GeminiSummarizer::new(settings.summary)?;
    let spinner = Output::spinner("Generating summary...");
    let result = summarizer.summarize(&text).await;
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            println!("{}", summary);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to generate summary: {}", e));
            Err(e.into())
        }
    }
}
