//! Digest and marker persistence: lookups and atomic whole-file writes

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;
use uuid::Uuid;

use super::marker::ProgressMarker;

pub const DIGEST_FILENAME: &str = "latest.md";
pub const PROJECT_PATH_FILENAME: &str = ".project-path";
const SESSIONS_DIRNAME: &str = "sessions";
const MARKER_EXTENSION: &str = "state";

/// Session ids name marker files, so they must be plain UUIDs
pub fn validate_session_id(session_id: &str) -> Result<()> {
    if session_id.is_empty() {
        bail!("session ID cannot be empty");
    }
    Uuid::parse_str(session_id)
        .with_context(|| format!("invalid UUID format for session ID: {}", session_id))?;
    Ok(())
}

pub fn project_context_dir(context_dir: &Path, project_id: &str) -> PathBuf {
    context_dir.join(project_id)
}

pub fn digest_path(context_dir: &Path, project_id: &str) -> PathBuf {
    project_context_dir(context_dir, project_id).join(DIGEST_FILENAME)
}

pub fn marker_path(context_dir: &Path, project_id: &str, session_id: &str) -> PathBuf {
    project_context_dir(context_dir, project_id)
        .join(SESSIONS_DIRNAME)
        .join(format!("{}.{}", session_id, MARKER_EXTENSION))
}

/// Locate the marker for `session_id` in any project directory
pub fn find_marker(context_dir: &Path, session_id: &str) -> Option<PathBuf> {
    validate_session_id(session_id).ok()?;

    let entries = fs::read_dir(context_dir).ok()?;
    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .map(|dir| {
            dir.join(SESSIONS_DIRNAME).join(format!("{}.{}", session_id, MARKER_EXTENSION))
        })
        .find(|candidate| candidate.is_file())
}

/// Write `contents` to `path` via a sibling temp file and rename
///
/// Creates the parent directory if missing. Readers never see a half-written file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("Path has no parent directory: {}", path.display()))?;
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let file_name = path
        .file_name()
        .with_context(|| format!("Path has no file name: {}", path.display()))?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    let temp_path = parent.join(temp_name);

    fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to {}", path.display()))?;

    Ok(())
}

pub fn write_digest(context_dir: &Path, project_id: &str, digest: &str) -> Result<PathBuf> {
    let path = digest_path(context_dir, project_id);
    write_atomic(&path, digest)?;
    Ok(path)
}

/// Remember which working directory a project id was derived from
pub fn write_project_path(context_dir: &Path, project_id: &str, project_path: &str) -> Result<()> {
    let path = project_context_dir(context_dir, project_id).join(PROJECT_PATH_FILENAME);
    write_atomic(&path, project_path)
}

/// Read the current digest for a project, if one has been written
pub fn read_digest(context_dir: &Path, project_id: &str) -> Option<String> {
    fs::read_to_string(digest_path(context_dir, project_id)).ok()
}

/// Load a marker; missing or corrupt markers read as `None`
pub fn load_marker(path: &Path) -> Option<ProgressMarker> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(marker) => Some(marker),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "ignoring unreadable progress marker");
            None
        }
    }
}

pub fn save_marker(path: &Path, marker: &ProgressMarker) -> Result<()> {
    let json = serde_json::to_string(marker).context("Failed to serialize progress marker")?;
    write_atomic(path, &json)
}
