use std::io::Read;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

/// JSON object the host writes to a hook's stdin
///
/// Only the fields the hooks use are decoded; all are optional so that partial input
/// degrades to a no-op instead of an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub transcript_path: Option<PathBuf>,
    #[serde(default)]
    pub cwd: Option<String>,
}

impl HookInput {
    /// Decode hook input; anything unreadable or malformed yields `None`
    pub fn from_reader<R: Read>(reader: R) -> Option<Self> {
        match serde_json::from_reader(reader) {
            Ok(input) => Some(input),
            Err(e) => {
                debug!(error = %e, "ignoring malformed hook input");
                None
            }
        }
    }

    /// Session id, if present and non-empty
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|id| !id.is_empty())
    }
}
