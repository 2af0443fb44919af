//! Session start: register the session and hand back the project's prior digest.

use anyhow::Result;
use tracing::debug;

use super::input::HookInput;
use crate::config::ContextConfig;
use crate::context_storage::persistence::validate_session_id;
use crate::context_storage::{
    ProgressMarker, marker_path, read_digest, save_marker, write_project_path,
};
use crate::utils::project_id;

/// Register a new session and return the digest left by earlier sessions of its project
///
/// Writes a fresh progress marker (count 0, parsing off) unless the session already has
/// one, so resumed sessions keep their state. Returns `None` when the input is incomplete
/// or the project has no digest yet.
///
/// # Errors
///
/// Returns an error if the marker or project path cannot be written.
pub fn start(config: &ContextConfig, input: &HookInput) -> Result<Option<String>> {
    let (Some(session_id), Some(transcript), Some(cwd)) =
        (input.session_id(), input.transcript_path.as_ref(), input.cwd.as_deref())
    else {
        debug!("incomplete session start input");
        return Ok(None);
    };
    if validate_session_id(session_id).is_err() || cwd.is_empty() {
        return Ok(None);
    }

    let project = project_id(cwd);
    let marker = marker_path(&config.context_dir, &project, session_id);
    if !marker.exists() {
        save_marker(&marker, &ProgressMarker::new(transcript.clone(), project.clone()))?;
        write_project_path(&config.context_dir, &project, cwd)?;
        debug!(session = session_id, project = %project, "registered session");
    }

    Ok(read_digest(&config.context_dir, &project).filter(|digest| !digest.trim().is_empty()))
}
