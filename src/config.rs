//! Filesystem layout and thresholds shared by every entry point.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::utils::get_claude_dir;

/// Exchange count at which the incremental driver switches from counting to parsing
pub const DEFAULT_EXCHANGE_THRESHOLD: usize = 3;
/// Minimum exchanges for bootstrap to pick a session log
pub const DEFAULT_BOOTSTRAP_THRESHOLD: usize = 2;

const PROJECTS_DIR_NAME: &str = "projects";
const CONTEXT_DIR_NAME: &str = "session-context";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    pub claude_dir: PathBuf,
    /// Where the host keeps session logs, one subdirectory per project
    pub projects_dir: PathBuf,
    /// Where digests and progress markers are written
    pub context_dir: PathBuf,
    pub exchange_threshold: usize,
    pub bootstrap_threshold: usize,
}

impl ContextConfig {
    pub fn from_claude_dir(claude_dir: &Path) -> Self {
        Self {
            claude_dir: claude_dir.to_path_buf(),
            projects_dir: claude_dir.join(PROJECTS_DIR_NAME),
            context_dir: claude_dir.join(CONTEXT_DIR_NAME),
            exchange_threshold: DEFAULT_EXCHANGE_THRESHOLD,
            bootstrap_threshold: DEFAULT_BOOTSTRAP_THRESHOLD,
        }
    }

    /// Resolve from an explicit claude directory, or `~/.claude`
    pub fn resolve(claude_dir: Option<&Path>) -> Result<Self> {
        match claude_dir {
            Some(dir) => Ok(Self::from_claude_dir(dir)),
            None => Ok(Self::from_claude_dir(&get_claude_dir()?)),
        }
    }
}
