//! Session Context - carry a summary of the last Claude Code session into the next one
//!
//! This library reads Claude Code's append-only session logs (`~/.claude/projects/`)
//! and condenses them into a short markdown digest. It provides:
//!
//! - Record classification and text/artifact extraction for session log lines
//! - A single-pass reducer that groups records into request/response exchanges
//! - A bounded digest builder (session goal, summarized middle, last exchanges in full)
//! - Hook entry points: one-time bootstrap, session start, and per-turn incremental update
//!
//! # Example
//!
//! ```no_run
//! use session_context::{build_context, parse_exchanges};
//! use std::path::Path;
//!
//! let exchanges = parse_exchanges(Path::new("/Users/alice/.claude/projects/-app/s.jsonl"))?;
//! println!("{}", build_context(&exchanges));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod context_storage;
pub mod discovery;
pub mod hooks;
pub mod models;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use config::ContextConfig;
pub use context::build_context;
pub use models::{Content, ContentPart, Exchange, LogRecord};
pub use parsers::{count_exchanges, count_exchanges_in, parse_exchanges, reduce_exchanges};
pub use utils::{decode_project_dir_name, project_id};
