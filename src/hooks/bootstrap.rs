//! One-time digest generation for every existing project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::ContextConfig;
use crate::context::build_context;
use crate::context_storage::{write_digest, write_project_path};
use crate::discovery::discover_projects;
use crate::models::{Exchange, ProjectInfo};
use crate::parsers::parse_exchanges;
use crate::parsers::session::first_record;
use crate::utils::{decode_project_dir_name, project_id};

/// Summary of a bootstrap run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapStats {
    pub projects: usize,
    pub generated: usize,
    pub skipped: usize,
    /// Working directories a digest was written for, in visit order
    pub generated_paths: Vec<String>,
}

/// Working directory for a project: the log's recorded `cwd`, else the decoded dir name
pub fn resolve_project_path(dir_name: &str, log: &Path) -> String {
    first_record(log)
        .and_then(|record| record.cwd)
        .unwrap_or_else(|| decode_project_dir_name(dir_name))
}

/// Newest log with at least `threshold` exchanges
fn select_session(project: &ProjectInfo, threshold: usize) -> Option<(&Path, Vec<Exchange>)> {
    project.session_logs.iter().find_map(|log| match parse_exchanges(log) {
        Ok(exchanges) if exchanges.len() >= threshold => Some((log.as_path(), exchanges)),
        Ok(_) => None,
        Err(e) => {
            warn!(log = %log.display(), error = %e, "skipping unreadable session log");
            None
        }
    })
}

/// Write a digest and path marker for every project that has a qualifying session
///
/// Projects are visited in directory-name order. For each, session logs are tried
/// newest first and the first with at least `config.bootstrap_threshold` exchanges is
/// summarized. Projects without one are counted as skipped.
///
/// # Errors
///
/// Returns an error if the projects directory cannot be listed or a digest cannot be
/// written.
pub fn bootstrap(config: &ContextConfig) -> Result<BootstrapStats> {
    let mut stats = BootstrapStats::default();
    if !config.projects_dir.exists() {
        return Ok(stats);
    }

    fs::create_dir_all(&config.context_dir).with_context(|| {
        format!("Failed to create context directory: {}", config.context_dir.display())
    })?;

    for project in discover_projects(&config.projects_dir)? {
        stats.projects += 1;

        let Some((log, exchanges)) = select_session(&project, config.bootstrap_threshold) else {
            stats.skipped += 1;
            continue;
        };

        let digest = build_context(&exchanges);
        if digest.is_empty() {
            stats.skipped += 1;
            continue;
        }

        let project_path = resolve_project_path(&project.dir_name, log);
        let id = project_id(&project_path);
        write_digest(&config.context_dir, &id, &digest)?;
        write_project_path(&config.context_dir, &id, &project_path)?;
        info!(project = %project_path, id = %id, exchanges = exchanges.len(), "digest generated");

        stats.generated += 1;
        stats.generated_paths.push(project_path);
    }

    Ok(stats)
}
