//! Single-pass grouping of session records into exchanges.

use chrono::{DateTime, FixedOffset};

use crate::models::{Content, Exchange, LogRecord};
use crate::parsers::classifier::is_conversational;
use crate::parsers::extractors::{extract_commits, extract_files, extract_text};

/// User text must be longer than this (in characters, after trimming) to open an exchange
pub const MIN_USER_TEXT_CHARS: usize = 5;

/// Whether trimmed user text is substantial enough to count as a request
pub fn is_qualifying_user_text(text: &str) -> bool {
    text.chars().count() > MIN_USER_TEXT_CHARS
}

#[derive(Debug)]
struct OpenExchange {
    timestamp: Option<DateTime<FixedOffset>>,
    user_text: String,
    assistant_text: String,
    files_modified: Vec<String>,
    commits: Vec<String>,
}

impl OpenExchange {
    fn new(user_text: String, timestamp: Option<DateTime<FixedOffset>>) -> Self {
        Self {
            timestamp,
            user_text,
            assistant_text: String::new(),
            files_modified: Vec::new(),
            commits: Vec::new(),
        }
    }

    fn absorb_assistant(&mut self, content: &Content) {
        let text = extract_text(content);
        let text = text.trim();
        if !text.is_empty() {
            if !self.assistant_text.is_empty() {
                self.assistant_text.push_str("\n\n");
            }
            self.assistant_text.push_str(text);
        }
        self.files_modified.extend(extract_files(content));
        self.commits.extend(extract_commits(content));
    }

    fn close(self) -> Exchange {
        Exchange {
            timestamp: self.timestamp,
            user_text: self.user_text,
            assistant_text: self.assistant_text,
            files_modified: self.files_modified,
            commits: self.commits,
        }
    }
}

/// Stateful fold from an ordered record stream to closed [`Exchange`]s
///
/// An exchange opens on a user turn with qualifying text, absorbs every assistant turn
/// until the next user turn, and closes when that user turn arrives or at [`finish`].
/// A non-qualifying user turn still closes the open exchange, and the assistant records
/// that follow it belong to nothing.
///
/// [`finish`]: ExchangeReducer::finish
#[derive(Debug, Default)]
pub struct ExchangeReducer {
    open: Option<OpenExchange>,
    closed: Vec<Exchange>,
}

impl ExchangeReducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &LogRecord) {
        if !is_conversational(record) {
            return;
        }

        if record.is_user_turn() {
            if let Some(open) = self.open.take() {
                self.closed.push(open.close());
            }

            let text = extract_text(record.content());
            let text = text.trim();
            if is_qualifying_user_text(text) {
                self.open = Some(OpenExchange::new(text.to_string(), record.timestamp));
            }
        } else if record.is_assistant_turn()
            && let Some(open) = self.open.as_mut()
        {
            open.absorb_assistant(record.content());
        }
    }

    /// Exchanges closed so far, not counting the one still open
    pub fn closed(&self) -> &[Exchange] {
        &self.closed
    }

    pub fn finish(mut self) -> Vec<Exchange> {
        if let Some(open) = self.open.take() {
            self.closed.push(open.close());
        }
        self.closed
    }
}

/// Reduce a record stream to its exchanges
pub fn reduce_exchanges<I>(records: I) -> Vec<Exchange>
where
    I: IntoIterator<Item = LogRecord>,
{
    let mut reducer = ExchangeReducer::new();
    for record in records {
        reducer.push(&record);
    }
    reducer.finish()
}

/// Cheap boundary count: every conversational user turn counts, with no length filter
///
/// This can exceed the reducer's exchange count when a session has short acknowledgements
/// such as "ok" or "yes".
pub fn count_exchanges<I>(records: I) -> usize
where
    I: IntoIterator<Item = LogRecord>,
{
    records.into_iter().filter(|r| is_conversational(r) && r.is_user_turn()).count()
}
