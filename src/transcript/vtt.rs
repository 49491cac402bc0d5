//! WebVTT cue parsing.
//!
//! Only what is needed to turn yt-dlp auto-subtitles into plain text: the
//! header, NOTE/STYLE/REGION blocks and cue settings are skipped, inline cue
//! tags (`<c>`, `<00:00:01.000>`, ...) are removed, and cue order is kept.

use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

/// A single timed subtitle cue.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub start: Duration,
    pub end: Duration,
    /// Cue payload with tags removed; multiple lines are joined with `\n`.
    pub text: String,
}

impl Cue {
    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }
}

fn timing_regex() -> &'static Regex {
    static TIMING: OnceLock<Regex> = OnceLock::new();
    TIMING.get_or_init(|| Regex::new(r"^\s*(\S+)\s+-->\s+(\S+)").expect("Invalid regex"))
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid regex"))
}

/// Parse a WebVTT document into its cues, in file order.
pub fn parse_vtt(content: &str) -> Result<Vec<Cue>, String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();

    match lines.next() {
        Some(first) if first.starts_with("WEBVTT") => {}
        _ => return Err("missing WEBVTT header".to_string()),
    }

    let mut cues = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    // The header block runs until the first blank line.
    let mut in_header = true;

    for line in lines.chain(std::iter::once("")) {
        if !line.trim().is_empty() {
            block.push(line);
            continue;
        }
        if in_header {
            in_header = false;
            block.clear();
            continue;
        }
        if !block.is_empty() {
            if let Some(cue) = parse_block(&block)? {
                cues.push(cue);
            }
            block.clear();
        }
    }

    Ok(cues)
}

/// Parse one blank-line separated block. Non-cue blocks yield `None`.
fn parse_block(block: &[&str]) -> Result<Option<Cue>, String> {
    let first = block[0].trim_start();
    if first.starts_with("NOTE") || first.starts_with("STYLE") || first.starts_with("REGION") {
        return Ok(None);
    }

    // An optional identifier line precedes the timing line.
    let Some(timing_idx) = block.iter().take(2).position(|l| l.contains("-->")) else {
        return Ok(None);
    };

    let caps = timing_regex()
        .captures(block[timing_idx])
        .ok_or_else(|| format!("invalid timing line: {}", block[timing_idx]))?;
    let start = parse_timestamp(&caps[1])?;
    let end = parse_timestamp(&caps[2])?;

    let text = block[timing_idx + 1..]
        .iter()
        .map(|l| clean_text(l))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Some(Cue { start, end, text }))
}

/// Parse `HH:MM:SS.mmm` or `MM:SS.mmm`.
fn parse_timestamp(raw: &str) -> Result<Duration, String> {
    let invalid = || format!("invalid timestamp: {raw}");

    let (clock, millis) = raw.split_once('.').ok_or_else(invalid)?;
    if millis.len() != 3 {
        return Err(invalid());
    }
    let millis: u64 = millis.parse().map_err(|_| invalid())?;

    let parts = clock
        .split(':')
        .map(|p| p.parse::<u64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => (0, *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid()),
    };
    if minutes > 59 || seconds > 59 {
        return Err(invalid());
    }

    let total = hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(invalid)?;

    Ok(Duration::from_millis(total))
}

fn clean_text(line: &str) -> String {
    tag_regex()
        .replace_all(line, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
