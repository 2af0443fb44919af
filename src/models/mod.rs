//! Data models for session logs and the summaries derived from them.
//!
//! - [`LogRecord`] - One decoded line of a session log
//! - [`Content`] / [`ContentPart`] - The two shapes of `message.content`
//! - [`Exchange`] - A user request and the assistant activity that followed it
//! - [`ProjectInfo`] - A discovered project directory and its session logs
//!
//! Record decoding is forgiving: lenient deserializers in
//! `parsers::deserializers` turn odd field values into absent ones instead of
//! rejecting the whole line.

pub mod exchange;
pub mod project;
pub mod record;

pub use exchange::Exchange;
pub use project::ProjectInfo;
pub use record::{Content, ContentPart, LogRecord, Message};
