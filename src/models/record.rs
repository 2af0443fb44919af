use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const RECORD_TYPE_USER: &str = "user";
pub const RECORD_TYPE_ASSISTANT: &str = "assistant";
pub const RECORD_TYPE_SNAPSHOT: &str = "file-history-snapshot";

/// One decoded line of a session log
///
/// Only the fields the summarizer looks at are kept; everything else in the line is ignored.
/// A field of the wrong JSON type reads as absent instead of rejecting the line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string"
    )]
    pub record_type: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_truthy")]
    pub is_meta: bool,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_timestamp"
    )]
    pub timestamp: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub cwd: Option<String>,
}

impl LogRecord {
    pub fn role(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.role.as_deref())
    }

    /// Message content, or empty text when the record carries no message
    pub fn content(&self) -> &Content {
        static EMPTY: Content = Content::Text(String::new());
        self.message.as_ref().map(|m| &m.content).unwrap_or(&EMPTY)
    }

    /// True for a user-typed record whose message role is also `user`
    pub fn is_user_turn(&self) -> bool {
        self.record_type.as_deref() == Some(RECORD_TYPE_USER) && self.role() == Some("user")
    }

    pub fn is_assistant_turn(&self) -> bool {
        self.record_type.as_deref() == Some(RECORD_TYPE_ASSISTANT)
            && self.role() == Some("assistant")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Content,
}

/// `message.content` is either a plain string or an array of typed parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl Default for Content {
    fn default() -> Self {
        Content::Text(String::new())
    }
}

impl Content {
    /// Any shape other than a string or an array reads as empty text
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Content::Text(s),
            Value::Array(items) => {
                Content::Parts(items.into_iter().map(ContentPart::from_value).collect())
            }
            _ => Content::default(),
        }
    }

    pub fn parts(&self) -> &[ContentPart] {
        match self {
            Content::Parts(parts) => parts,
            Content::Text(_) => &[],
        }
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Content::from_value)
    }
}

/// A single element of a content array
///
/// Decoding never fails: unknown or malformed parts become [`ContentPart::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Thinking,
    Text(String),
    ToolUse { name: String, input: Value },
    ToolResult { tool_use_id: Option<String> },
    /// A bare string inside the content array
    Bare(String),
    Other,
}

impl ContentPart {
    pub fn from_value(value: Value) -> Self {
        let map = match value {
            Value::String(s) => return ContentPart::Bare(s),
            Value::Object(map) => map,
            _ => return ContentPart::Other,
        };

        let str_field = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);

        match map.get("type").and_then(Value::as_str) {
            Some("thinking") => ContentPart::Thinking,
            Some("text") => ContentPart::Text(str_field("text").unwrap_or_default()),
            Some("tool_use") => ContentPart::ToolUse {
                name: str_field("name").unwrap_or_default(),
                input: map.get("input").cloned().unwrap_or(Value::Null),
            },
            Some("tool_result") => ContentPart::ToolResult { tool_use_id: str_field("tool_use_id") },
            _ => ContentPart::Other,
        }
    }
}

impl<'de> Deserialize<'de> for ContentPart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(ContentPart::from_value)
    }
}
