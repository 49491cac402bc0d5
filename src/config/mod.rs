//! Configuration module for vidsum.
//!
//! Handles loading application settings from TOML.

mod settings;

pub use settings::{
    GeneralSettings, ServerSettings, Settings, SummarySettings, YoutubeSettings, API_KEY_ENV,
};
