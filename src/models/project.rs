use std::path::PathBuf;

/// A project directory under `~/.claude/projects` and its top-level session logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub dir_name: String,
    pub project_dir: PathBuf,
    /// Session logs ordered newest-modified first
    pub session_logs: Vec<PathBuf>,
}
