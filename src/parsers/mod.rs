//! Session log parsing: record classification, text/artifact extraction, and the
//! exchange reducer.
//!
//! # Error Handling Strategy
//!
//! Parsing follows a **graceful degradation** approach suitable for hook processes:
//!
//! - **Individual line failures**: Malformed JSON lines are skipped (logged at `debug`),
//!   never reported to the host. A session log is append-only and may end mid-write.
//!
//! - **Optional fields**: Missing or oddly-typed timestamps, flags, and tool inputs decode
//!   to absent values instead of failing the record.
//!
//! - **Missing logs**: A log that does not exist yields no exchanges rather than an error.
//!
//! - **Error propagation**: Uses `anyhow::Result` with context for the failures that do
//!   matter (opening an existing log).

pub mod classifier;
pub mod deserializers;
pub mod exchanges;
pub mod extractors;
pub mod session;

pub use classifier::{is_noise, is_tool_result};
pub use exchanges::{ExchangeReducer, count_exchanges, reduce_exchanges};
pub use extractors::{extract_commits, extract_files, extract_text};
pub use session::{count_exchanges_in, parse_exchanges, read_records};
