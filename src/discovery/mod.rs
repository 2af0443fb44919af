//! Discovery of project directories and their session logs
//!
//! # Error Handling Strategy
//!
//! - **Missing projects directory**: returns an empty list, not an error.
//! - **Unreadable project directories**: logged with `tracing::warn!` and skipped, so one
//!   bad project does not stop a bootstrap run.
//! - **Symlinks**: project directories and logs that are symlinks are skipped.

pub mod project_discovery;

pub use project_discovery::discover_projects;
