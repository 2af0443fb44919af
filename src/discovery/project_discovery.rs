use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use tracing::warn;
use walkdir::WalkDir;

use crate::models::ProjectInfo;
use crate::utils::validate_path_not_symlink;

const SESSION_LOG_EXTENSION: &str = "jsonl";
/// Sub-agent transcripts live next to session logs but are not sessions of their own
const AGENT_LOG_PREFIX: &str = "agent-";

/// Discover every project directory under `projects_dir`
///
/// Projects are returned sorted by directory name. Each carries its top-level session logs
/// (`*.jsonl`, excluding `agent-*.jsonl`) ordered newest-modified first.
///
/// # Errors
///
/// Returns an error only if `projects_dir` exists but cannot be listed. Individual project
/// directories that cannot be read are logged and skipped.
pub fn discover_projects(projects_dir: &Path) -> Result<Vec<ProjectInfo>> {
    if !projects_dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(projects_dir)
        .with_context(|| format!("Failed to read projects directory: {}", projects_dir.display()))?;

    let mut projects = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let dir_name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => continue,
        };

        if let Err(e) = validate_path_not_symlink(&path) {
            warn!(project = %dir_name, error = %e, "skipping project directory");
            continue;
        }

        let session_logs = match find_session_logs(&path) {
            Ok(logs) => logs,
            Err(e) => {
                warn!(project = %dir_name, error = %e, "failed to read project directory");
                continue;
            }
        };

        projects.push(ProjectInfo { dir_name, project_dir: path, session_logs });
    }

    projects.sort_by(|a, b| a.dir_name.cmp(&b.dir_name));
    Ok(projects)
}

fn is_session_log(path: &Path) -> bool {
    let has_extension = path.extension().is_some_and(|ext| ext == SESSION_LOG_EXTENSION);
    let is_agent = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(AGENT_LOG_PREFIX));
    has_extension && !is_agent
}

/// Top-level session logs of one project directory, newest-modified first
fn find_session_logs(project_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut logs: Vec<(SystemTime, PathBuf)> = Vec::new();

    for entry in WalkDir::new(project_dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| {
            format!("Failed to list project directory: {}", project_dir.display())
        })?;
        if !entry.file_type().is_file() || !is_session_log(entry.path()) {
            continue;
        }

        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        logs.push((modified, entry.into_path()));
    }

    logs.sort_by(|a, b| b.cmp(a));
    Ok(logs.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;

    fn touch(path: &Path, secs_after_epoch: u64) {
        let file = File::create(path).expect("Failed to create file");
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs_after_epoch))
            .expect("Failed to set mtime");
    }

    #[test]
    fn test_missing_projects_directory() {
        let dir = TempDir::new().unwrap();
        let projects = discover_projects(&dir.path().join("projects")).unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn test_projects_sorted_and_logs_newest_first() {
        let dir = TempDir::new().unwrap();
        let beta = dir.path().join("-Users-test-beta");
        let alpha = dir.path().join("-Users-test-alpha");
        fs::create_dir_all(&beta).unwrap();
        fs::create_dir_all(&alpha).unwrap();

        touch(&alpha.join("old.jsonl"), 1_000);
        touch(&alpha.join("new.jsonl"), 2_000);
        touch(&alpha.join("agent-123.jsonl"), 3_000);
        touch(&alpha.join("notes.txt"), 4_000);
        fs::create_dir(alpha.join("nested.jsonl")).unwrap();

        let projects = discover_projects(dir.path()).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].dir_name, "-Users-test-alpha");
        assert_eq!(projects[1].dir_name, "-Users-test-beta");

        let names: Vec<_> = projects[0]
            .session_logs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["new.jsonl", "old.jsonl"]);
        assert!(projects[1].session_logs.is_empty());
    }

    #[test]
    fn test_skips_files_in_projects_root() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("stray.jsonl"), 1);
        fs::create_dir(dir.path().join("-Users-test-app")).unwrap();

        let projects = discover_projects(dir.path()).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].dir_name, "-Users-test-app");
    }

    #[cfg(unix)]
    #[test]
    fn test_skips_symlinked_project_directory() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("-linked")).unwrap();
        fs::create_dir(dir.path().join("-real")).unwrap();

        let projects = discover_projects(dir.path()).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].dir_name, "-real");
    }
}
