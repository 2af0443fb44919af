//! Incremental digest refresh, run after every assistant turn.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use super::input::HookInput;
use crate::config::ContextConfig;
use crate::context::build_context;
use crate::context_storage::{ProgressMarker, find_marker, load_marker, save_marker, write_digest};
use crate::parsers::{count_exchanges_in, parse_exchanges};

/// What an update did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Input, marker, or log missing; nothing read or written
    NoOp,
    /// Still below the threshold; only the marker's count was updated
    Counted { exchange_count: usize },
    /// Full parse ran; `digest_written` is false when the session had under two exchanges
    Parsed { exchanges: usize, digest_written: bool },
}

/// Project ids name directories, so only plain alphanumeric ids are accepted
fn is_valid_project_id(project_id: &str) -> bool {
    !project_id.is_empty() && project_id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Parse the whole log, rebuild the digest, and overwrite it when non-empty
fn refresh_digest(config: &ContextConfig, project_id: &str, log: &Path) -> Result<(usize, bool)> {
    let exchanges = parse_exchanges(log)?;
    let digest = build_context(&exchanges);
    if digest.is_empty() {
        return Ok((exchanges.len(), false));
    }

    let path = write_digest(&config.context_dir, project_id, &digest)?;
    info!(path = %path.display(), exchanges = exchanges.len(), "digest updated");
    Ok((exchanges.len(), true))
}

/// Advance one session's progress marker against its growing log
///
/// Until the session reaches `config.exchange_threshold` boundaries only a cheap count
/// runs. Once it does, parsing is enabled for good and every later call re-parses the
/// full log and overwrites the project digest.
///
/// # Errors
///
/// Missing input, marker, or log is a no-op. Failing to read an existing log or to write
/// the digest or marker is an error.
pub fn update(config: &ContextConfig, input: &HookInput) -> Result<UpdateOutcome> {
    let Some(session_id) = input.session_id() else {
        return Ok(UpdateOutcome::NoOp);
    };
    let Some(marker_path) = find_marker(&config.context_dir, session_id) else {
        debug!(session = session_id, "no progress marker");
        return Ok(UpdateOutcome::NoOp);
    };
    let Some(mut marker) = load_marker(&marker_path) else {
        return Ok(UpdateOutcome::NoOp);
    };
    if !marker.log_location.exists() || !is_valid_project_id(&marker.project_id) {
        debug!(session = session_id, "marker points at a missing log or invalid project");
        return Ok(UpdateOutcome::NoOp);
    }

    let outcome = advance(config, &mut marker)?;
    save_marker(&marker_path, &marker)?;
    Ok(outcome)
}

fn advance(config: &ContextConfig, marker: &mut ProgressMarker) -> Result<UpdateOutcome> {
    let log = marker.log_location.clone();

    if !marker.parsing_enabled {
        let count = count_exchanges_in(&log)?;
        if count < config.exchange_threshold {
            marker.record_count(count);
            return Ok(UpdateOutcome::Counted { exchange_count: marker.exchange_count });
        }
        debug!(count, threshold = config.exchange_threshold, "enabling full parsing");
        marker.enable_parsing();
    }

    let (exchanges, digest_written) = refresh_digest(config, &marker.project_id, &log)?;
    marker.record_count(exchanges);
    Ok(UpdateOutcome::Parsed { exchanges, digest_written })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::context_storage::{marker_path, read_digest};

    const SESSION: &str = "550e8400-e29b-41d4-a716-446655440000";
    const PROJECT: &str = "0123456789abcdef";

    fn user(text: &str) -> String {
        serde_json::json!({
            "type": "user",
            "timestamp": "2025-01-15T10:30:00Z",
            "message": {"role": "user", "content": text}
        })
        .to_string()
    }

    fn assistant(text: &str) -> String {
        serde_json::json!({
            "type": "assistant",
            "message": {"role": "assistant", "content": [{"type": "text", "text": text}]}
        })
        .to_string()
    }

    struct Fixture {
        _dir: TempDir,
        config: ContextConfig,
        log: std::path::PathBuf,
        marker: std::path::PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let config = ContextConfig::from_claude_dir(dir.path());
        let log = config.projects_dir.join("-app").join(format!("{SESSION}.jsonl"));
        fs::create_dir_all(log.parent().unwrap()).unwrap();
        fs::write(&log, "").unwrap();

        let marker = marker_path(&config.context_dir, PROJECT, SESSION);
        save_marker(&marker, &ProgressMarker::new(log.clone(), PROJECT.to_string())).unwrap();
        Fixture { _dir: dir, config, log, marker }
    }

    fn write_log(f: &Fixture, lines: &[String]) {
        fs::write(&f.log, lines.join("\n")).unwrap();
    }

    fn input() -> HookInput {
        HookInput { session_id: Some(SESSION.to_string()), ..Default::default() }
    }

    #[test]
    fn test_no_session_id_is_noop() {
        let f = fixture();
        assert_eq!(update(&f.config, &HookInput::default()).unwrap(), UpdateOutcome::NoOp);
    }

    #[test]
    fn test_unknown_session_is_noop() {
        let f = fixture();
        let other = HookInput {
            session_id: Some("650e8400-e29b-41d4-a716-446655440000".to_string()),
            ..Default::default()
        };
        assert_eq!(update(&f.config, &other).unwrap(), UpdateOutcome::NoOp);
    }

    #[test]
    fn test_missing_log_is_noop() {
        let f = fixture();
        fs::remove_file(&f.log).unwrap();
        assert_eq!(update(&f.config, &input()).unwrap(), UpdateOutcome::NoOp);
    }

    #[test]
    fn test_counts_below_threshold() {
        let f = fixture();
        write_log(&f, &[user("first request"), assistant("answer"), user("ok")]);

        let outcome = update(&f.config, &input()).unwrap();
        assert_eq!(outcome, UpdateOutcome::Counted { exchange_count: 2 });

        let marker = load_marker(&f.marker).unwrap();
        assert_eq!(marker.exchange_count, 2);
        assert!(!marker.parsing_enabled);
        assert!(read_digest(&f.config.context_dir, PROJECT).is_none());
    }

    #[test]
    fn test_crossing_threshold_enables_parsing_and_writes_digest() {
        let f = fixture();
        write_log(
            &f,
            &[
                user("first request"),
                assistant("first answer"),
                user("second request"),
                assistant("second answer"),
                user("third request"),
            ],
        );

        let outcome = update(&f.config, &input()).unwrap();
        assert_eq!(outcome, UpdateOutcome::Parsed { exchanges: 3, digest_written: true });

        let marker = load_marker(&f.marker).unwrap();
        assert!(marker.parsing_enabled);
        assert_eq!(marker.exchange_count, 3);

        let digest = read_digest(&f.config.context_dir, PROJECT).unwrap();
        assert!(digest.contains("third request"));
    }

    #[test]
    fn test_short_messages_can_cross_threshold_without_digest() {
        let f = fixture();
        write_log(&f, &[user("first request"), user("ok"), user("yes")]);

        let outcome = update(&f.config, &input()).unwrap();
        assert_eq!(outcome, UpdateOutcome::Parsed { exchanges: 1, digest_written: false });

        let marker = load_marker(&f.marker).unwrap();
        assert!(marker.parsing_enabled);
        assert_eq!(marker.exchange_count, 1);
    }

    #[test]
    fn test_parsing_stays_enabled_and_count_never_drops() {
        let f = fixture();
        write_log(&f, &[user("first request"), user("second request"), user("third request")]);
        update(&f.config, &input()).unwrap();

        // Log shrinks (e.g. rewritten by the host); marker keeps its high-water mark
        write_log(&f, &[user("first request")]);
        let outcome = update(&f.config, &input()).unwrap();
        assert_eq!(outcome, UpdateOutcome::Parsed { exchanges: 1, digest_written: false });

        let marker = load_marker(&f.marker).unwrap();
        assert!(marker.parsing_enabled);
        assert_eq!(marker.exchange_count, 3);

        // The earlier digest is left in place
        assert!(read_digest(&f.config.context_dir, PROJECT).unwrap().contains("third request"));
    }

    #[test]
    fn test_repeated_update_is_idempotent() {
        let f = fixture();
        write_log(
            &f,
            &[user("first request"), assistant("a"), user("second request"), user("third request")],
        );
        update(&f.config, &input()).unwrap();
        let first = read_digest(&f.config.context_dir, PROJECT).unwrap();
        update(&f.config, &input()).unwrap();
        let second = read_digest(&f.config.context_dir, PROJECT).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_project_id_is_noop() {
        let f = fixture();
        let mut marker = load_marker(&f.marker).unwrap();
        marker.project_id = "../escape".to_string();
        save_marker(&f.marker, &marker).unwrap();
        assert_eq!(update(&f.config, &input()).unwrap(), UpdateOutcome::NoOp);
    }
}
