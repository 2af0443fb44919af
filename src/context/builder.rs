use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};

use crate::models::Exchange;

/// Fewer exchanges than this produce no digest
pub const MIN_EXCHANGES: usize = 2;
/// Exchanges at the end of the session that are always rendered in full
pub const RECENT_WINDOW: usize = 3;
pub const MAX_LISTED_FILES: usize = 10;
/// Character limit for a one-line request summary
pub const SUMMARY_MAX_CHARS: usize = 300;

const UNKNOWN_TIME: &str = "??:??";
const ELLIPSIS: &str = "...";

fn format_time(ts: Option<&DateTime<FixedOffset>>) -> String {
    ts.map(|t| t.format("%H:%M").to_string()).unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

/// Distinct paths in first-seen order, keeping at most the last `MAX_LISTED_FILES`
///
/// Returns the kept paths and how many were left out.
fn listed_files(exchanges: &[Exchange]) -> (Vec<&str>, usize) {
    let mut seen = HashSet::new();
    let distinct: Vec<&str> = exchanges
        .iter()
        .flat_map(|e| e.files_modified.iter())
        .map(String::as_str)
        .filter(|path| seen.insert(*path))
        .collect();

    let overflow = distinct.len().saturating_sub(MAX_LISTED_FILES);
    (distinct[overflow..].to_vec(), overflow)
}

fn summarize(text: &str) -> String {
    if text.chars().count() > SUMMARY_MAX_CHARS {
        let cut: String = text.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{cut}{ELLIPSIS}")
    } else {
        text.to_string()
    }
}

/// Render exchanges as the markdown digest injected into the next session
///
/// Sections, each omitted when empty: session span, files modified, git commits,
/// session goal (the first exchange when it is not among the last three), other requests
/// (one-line summaries of the middle, only when there are more than four exchanges), and
/// the last three exchanges in full.
///
/// Returns an empty string for fewer than two exchanges.
pub fn build_context(exchanges: &[Exchange]) -> String {
    if exchanges.len() < MIN_EXCHANGES {
        return String::new();
    }

    let total = exchanges.len();
    let mut lines: Vec<String> = Vec::new();

    let timestamps = exchanges.iter().filter_map(|e| e.timestamp.as_ref());
    let start = timestamps.clone().min();
    let end = timestamps.max();
    lines.push(format!("### Session: {} → {}\n", format_time(start), format_time(end)));

    let (files, overflow) = listed_files(exchanges);
    if !files.is_empty() {
        lines.push("### Files Modified".to_string());
        lines.extend(files.iter().map(|f| format!("- `{f}`")));
        if overflow > 0 {
            lines.push(format!("- ...and {overflow} more"));
        }
        lines.push(String::new());
    }

    let commits: Vec<&str> =
        exchanges.iter().flat_map(|e| e.commits.iter()).map(String::as_str).collect();
    if !commits.is_empty() {
        lines.push("### Git Commits".to_string());
        lines.extend(commits.iter().map(|c| format!("- {c}")));
        lines.push(String::new());
    }

    let recent_start = total.saturating_sub(RECENT_WINDOW);

    if recent_start > 0 {
        lines.push("### Session Goal".to_string());
        lines.push(exchanges[0].user_text.clone());
        lines.push(String::new());
    }

    if total > RECENT_WINDOW + 1 {
        lines.push("### Other Requests".to_string());
        lines.extend(
            exchanges[1..recent_start].iter().map(|e| format!("- {}", summarize(&e.user_text))),
        );
        lines.push(String::new());
    }

    lines.push("### Where We Left Off (Last Exchanges)\n".to_string());
    for exchange in &exchanges[recent_start..] {
        let t = format_time(exchange.timestamp.as_ref());
        lines.push(format!("**[{t}] User:**"));
        lines.push(exchange.user_text.clone());
        lines.push(String::new());
        if !exchange.assistant_text.is_empty() {
            lines.push(format!("**[{t}] Assistant:**"));
            lines.push(exchange.assistant_text.clone());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}
