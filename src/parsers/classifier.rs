use crate::models::record::RECORD_TYPE_SNAPSHOT;
use crate::models::{Content, ContentPart, LogRecord};

/// Substrings that mark a string message as an echoed slash command or its output
const COMMAND_MARKERS: [&str; 2] = ["<command-name>", "<local-command-stdout>"];

/// Meta records, file snapshots, and slash-command echoes never form part of an exchange
pub fn is_noise(record: &LogRecord) -> bool {
    if record.record_type.as_deref() == Some(RECORD_TYPE_SNAPSHOT) || record.is_meta {
        return true;
    }

    match record.content() {
        Content::Text(text) => COMMAND_MARKERS.iter().any(|marker| text.contains(marker)),
        Content::Parts(_) => false,
    }
}

/// A user-role record that only carries tool output back to the assistant
pub fn is_tool_result(record: &LogRecord) -> bool {
    matches!(record.content().parts().first(), Some(ContentPart::ToolResult { .. }))
}

/// Records the exchange reducer and counter look at
pub fn is_conversational(record: &LogRecord) -> bool {
    !is_noise(record) && !is_tool_result(record)
}
