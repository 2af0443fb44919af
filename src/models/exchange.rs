use chrono::{DateTime, FixedOffset};

/// One user request plus everything the assistant said and did before the next request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Exchange {
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub user_text: String,
    pub assistant_text: String,
    /// Paths touched by write-class tools, in call order (may repeat)
    pub files_modified: Vec<String>,
    pub commits: Vec<String>,
}
