//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

pub const SESSION_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

/// Builder for creating test .claude directory structures
pub struct ClaudeDirBuilder {
    temp_dir: TempDir,
}

impl ClaudeDirBuilder {
    /// Create a new builder with an empty .claude directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the .claude directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a project directory with the given encoded name and session logs
    pub fn with_project(self, encoded_name: &str, logs: &[SessionLogBuilder]) -> Self {
        let project_dir = self.temp_dir.path().join("projects").join(encoded_name);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        for log in logs {
            log.create_in(&project_dir);
        }

        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ClaudeDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one session log file (`<session>.jsonl`)
pub struct SessionLogBuilder {
    filename: String,
    lines: Vec<String>,
}

impl SessionLogBuilder {
    /// Create a new session log with the given filename
    pub fn new(filename: &str) -> Self {
        Self { filename: filename.to_string(), lines: Vec::new() }
    }

    /// Add a record
    pub fn with_record(mut self, record: RecordBuilder) -> Self {
        self.lines.push(record.to_json());
        self
    }

    /// Add a raw line verbatim
    pub fn with_raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Create the file in the given directory and return its path
    pub fn create_in(&self, dir: &Path) -> PathBuf {
        let path = dir.join(&self.filename);
        fs::write(&path, self.content()).expect("Failed to write session log");
        path
    }
}

/// Builder for a single session log record
pub struct RecordBuilder {
    record_type: String,
    role: Option<String>,
    content: Value,
    timestamp: Option<String>,
    cwd: Option<String>,
    is_meta: bool,
}

impl RecordBuilder {
    /// A user turn with plain string content
    pub fn user(text: &str) -> Self {
        Self {
            record_type: "user".to_string(),
            role: Some("user".to_string()),
            content: json!(text),
            timestamp: None,
            cwd: None,
            is_meta: false,
        }
    }

    /// An assistant turn with a single text part
    pub fn assistant(text: &str) -> Self {
        Self {
            record_type: "assistant".to_string(),
            role: Some("assistant".to_string()),
            content: json!([Self::text_block(text)]),
            timestamp: None,
            cwd: None,
            is_meta: false,
        }
    }

    /// A user-role record carrying tool output
    pub fn tool_result(tool_use_id: &str, output: &str) -> Self {
        Self {
            content: json!([{"type": "tool_result", "tool_use_id": tool_use_id, "content": output}]),
            ..Self::user("")
        }
    }

    /// A file-history snapshot record
    pub fn snapshot() -> Self {
        Self {
            record_type: "file-history-snapshot".to_string(),
            role: None,
            content: Value::Null,
            timestamp: None,
            cwd: None,
            is_meta: false,
        }
    }

    /// Replace the content with an array of parts
    pub fn parts(mut self, parts: Vec<Value>) -> Self {
        self.content = Value::Array(parts);
        self
    }

    /// Set the timestamp (RFC 3339)
    pub fn at(mut self, timestamp: &str) -> Self {
        self.timestamp = Some(timestamp.to_string());
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.cwd = Some(cwd.to_string());
        self
    }

    pub fn meta(mut self) -> Self {
        self.is_meta = true;
        self
    }

    pub fn text_block(text: &str) -> Value {
        json!({"type": "text", "text": text})
    }

    pub fn thinking_block(text: &str) -> Value {
        json!({"type": "thinking", "thinking": text})
    }

    pub fn tool_use_block(name: &str, input: Value) -> Value {
        json!({"type": "tool_use", "id": "toolu_01", "name": name, "input": input})
    }

    /// Convert to a JSON line
    pub fn to_json(&self) -> String {
        let mut record = json!({"type": self.record_type});
        if let Some(role) = &self.role {
            record["message"] = json!({"role": role, "content": self.content});
        }
        if let Some(ts) = &self.timestamp {
            record["timestamp"] = json!(ts);
        }
        if let Some(cwd) = &self.cwd {
            record["cwd"] = json!(cwd);
        }
        if self.is_meta {
            record["isMeta"] = json!(true);
        }
        record.to_string()
    }
}

/// Hook input JSON as the host writes it to stdin
pub fn hook_input(session_id: &str, transcript: &Path, cwd: &str) -> String {
    json!({
        "session_id": session_id,
        "transcript_path": transcript,
        "cwd": cwd,
        "hook_event_name": "Stop"
    })
    .to_string()
}

/// `n` request/response pairs at ten-minute intervals starting 10:00 UTC
pub fn conversation(n: usize) -> Vec<RecordBuilder> {
    (0..n)
        .flat_map(|i| {
            let ts = format!("2025-01-15T{:02}:{:02}:00Z", 10 + i / 6, (i % 6) * 10);
            [
                RecordBuilder::user(&format!("request number {i}")).at(&ts),
                RecordBuilder::assistant(&format!("response number {i}")).at(&ts),
            ]
        })
        .collect()
}

/// A session log holding `n` exchanges
pub fn session_with_exchanges(filename: &str, n: usize) -> SessionLogBuilder {
    conversation(n).into_iter().fold(SessionLogBuilder::new(filename), |log, r| log.with_record(r))
}
