//! Persistent digests and progress markers
//!
//! Layout under the context directory (`~/.claude/session-context/` by default):
//! - `<project-id>/latest.md`: most recent digest for the project
//! - `<project-id>/.project-path`: working directory the id was derived from
//! - `<project-id>/sessions/<session-id>.state`: JSON progress marker per session
//!
//! Every write replaces the whole file atomically (temp file + rename). There is no
//! locking: the host runs at most one hook per session at a time.

pub mod marker;
pub mod persistence;

pub use marker::ProgressMarker;
pub use persistence::{
    digest_path, find_marker, load_marker, marker_path, read_digest, save_marker, write_digest,
    write_project_path,
};
