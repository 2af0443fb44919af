use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::models::{Content, ContentPart};

/// Tools whose `file_path` input names a file they write
const WRITE_TOOLS: [&str; 3] = ["Edit", "Write", "MultiEdit"];
const SHELL_TOOL: &str = "Bash";
const COMMIT_INVOCATION: &str = "git commit";
const COMMIT_MESSAGE_MAX_CHARS: usize = 100;
/// Stands in for a commit whose message could not be pulled out of the command
pub const COMMIT_PLACEHOLDER: &str = "(commit)";

static COMMIT_MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"-m\s+["']([^"']+)["']"#).expect("commit message pattern is valid")
});

/// Narrative text of a message, with thinking blocks left out
///
/// String content is returned as-is. For part arrays, `text` parts and bare strings are
/// joined with newlines in order; empty text parts are skipped.
pub fn extract_text(content: &Content) -> String {
    match content {
        Content::Text(text) => text.clone(),
        Content::Parts(parts) => parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) if !text.is_empty() => Some(text.as_str()),
                ContentPart::Bare(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn tool_uses(content: &Content) -> impl Iterator<Item = (&str, &Value)> {
    content.parts().iter().filter_map(|part| match part {
        ContentPart::ToolUse { name, input } => Some((name.as_str(), input)),
        _ => None,
    })
}

/// Paths written by `Edit`/`Write`/`MultiEdit` calls, in call order, duplicates kept
pub fn extract_files(content: &Content) -> Vec<String> {
    tool_uses(content)
        .filter(|(name, _)| WRITE_TOOLS.contains(name))
        .filter_map(|(_, input)| input.get("file_path").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// Commit messages from shell calls that run `git commit`
///
/// Each commit attempt yields one entry: the quoted `-m` argument cut to 100 characters,
/// or [`COMMIT_PLACEHOLDER`] when no message can be matched.
pub fn extract_commits(content: &Content) -> Vec<String> {
    tool_uses(content)
        .filter(|(name, _)| *name == SHELL_TOOL)
        .filter_map(|(_, input)| input.get("command").and_then(Value::as_str))
        .filter(|command| command.contains(COMMIT_INVOCATION))
        .map(commit_message)
        .collect()
}

fn commit_message(command: &str) -> String {
    match COMMIT_MESSAGE_RE.captures(command).and_then(|caps| caps.get(1)) {
        Some(m) => m.as_str().chars().take(COMMIT_MESSAGE_MAX_CHARS).collect(),
        None => COMMIT_PLACEHOLDER.to_string(),
    }
}
