//! Per-session progress marker

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parse state of one session, rewritten after every incremental update
///
/// Keys written by older hook versions (`jsonl_path`, `project_hash`) are accepted on read.
/// Keys this crate does not know about are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressMarker {
    #[serde(alias = "jsonl_path", default)]
    pub log_location: PathBuf,
    #[serde(alias = "project_hash", default)]
    pub project_id: String,
    #[serde(default)]
    pub exchange_count: usize,
    #[serde(default)]
    pub parsing_enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProgressMarker {
    pub fn new(log_location: PathBuf, project_id: String) -> Self {
        Self {
            log_location,
            project_id,
            exchange_count: 0,
            parsing_enabled: false,
            extra: Map::new(),
        }
    }

    /// Record a new exchange count; the stored count never goes down
    pub fn record_count(&mut self, count: usize) {
        self.exchange_count = self.exchange_count.max(count);
    }

    /// Switch to full parsing; there is no way back
    pub fn enable_parsing(&mut self) {
        self.parsing_enabled = true;
    }
}
