//! CLI module for vidsum.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// vidsum - YouTube transcripts and summaries
///
/// Fetches a video's transcript (yt-dlp subtitles first, transcript API as
/// fallback) and summarizes it with Gemini.
#[derive(Parser, Debug)]
#[command(name = "vidsum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server (/transcript, /summarize)
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch the transcript of a single video and print it
    Transcript {
        /// YouTube URL or video ID
        video: String,
    },

    /// Summarize text with Gemini
    Summarize {
        /// Text to summarize (reads stdin if omitted)
        text: Option<String>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["vidsum", "-vv", "serve", "--port", "8080"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_summarize_without_text() {
        let cli = Cli::parse_from(["vidsum", "summarize"]);
        assert!(matches!(cli.command, Commands::Summarize { text: None }));
    }
}
