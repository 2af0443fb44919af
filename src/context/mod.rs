//! Markdown digest of a session's exchanges.
//!
//! The digest stays bounded however long the session runs: the opening request is kept
//! as the session goal, the last three exchanges are rendered in full, and everything in
//! between is reduced to one truncated line per request.

pub mod builder;

pub use builder::build_context;
