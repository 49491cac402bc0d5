//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::{Settings, API_KEY_ENV};
use console::style;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("vidsum Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("External Tools").bold());
    let tool = check_ytdlp(&settings.youtube.ytdlp_path);
    tool.print();
    checks.push(tool);
    println!();

    println!("{}", style("API Configuration").bold());
    let key = check_api_key(settings.summary.resolved_api_key().as_deref());
    key.print();
    checks.push(key);
    println!();

    println!("{}", style("Directories").bold());
    let temp = check_temp_dir(settings);
    temp.print();
    checks.push(temp);
    println!();

    println!("{}", style("Configuration").bold());
    let config = check_config_file();
    config.print();
    checks.push(config);
    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s) found.", errors));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! vidsum is ready to use.");
    }

    Ok(())
}

/// yt-dlp is optional: transcripts fall back to the transcript API without it.
fn check_ytdlp(program: &str) -> CheckResult {
    match Command::new(program).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            CheckResult::ok("yt-dlp", &version)
        }
        Ok(_) => CheckResult::warning("yt-dlp", "installed but not working", install_hint_ytdlp()),
        Err(_) => CheckResult::warning(
            "yt-dlp",
            "not found (transcript API fallback only)",
            install_hint_ytdlp(),
        ),
    }
}

fn check_api_key(key: Option<&str>) -> CheckResult {
    match key {
        Some(key) if key.chars().count() > 8 => {
            let head: String = key.chars().take(4).collect();
            let tail: String = key.chars().skip(key.chars().count() - 4).collect();
            let masked = format!("{}...{}", head, tail);
            CheckResult::ok(API_KEY_ENV, &format!("configured ({})", masked))
        }
        Some(_) => CheckResult::warning(
            API_KEY_ENV,
            "set but looks too short",
            "Check the key in Google AI Studio",
        ),
        None => CheckResult::error(
            API_KEY_ENV,
            "not set",
            &format!("Set summary.api_key or export {}='...'", API_KEY_ENV),
        ),
    }
}

fn check_temp_dir(settings: &Settings) -> CheckResult {
    let temp_dir = settings.temp_dir();
    if temp_dir.is_dir() {
        CheckResult::ok("Temp directory", &temp_dir.display().to_string())
    } else {
        CheckResult::warning(
            "Temp directory",
            &format!("{} (will be created)", temp_dir.display()),
            "Directory will be created on first use",
        )
    }
}

fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &config_path.display().to_string())
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            &format!("Create {} to override defaults", config_path.display()),
        )
    }
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}
