use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Get the Claude directory path (~/.claude)
///
/// Uses `$HOME`, falling back to the platform home directory when it is unset.
pub fn get_claude_dir() -> Result<PathBuf> {
    get_claude_dir_internal(env::var_os("HOME"))
}

/// Internal helper with the home directory passed in (for testing)
pub(crate) fn get_claude_dir_internal(home: Option<OsString>) -> Result<PathBuf> {
    let home = home
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .context("HOME environment variable not set")?;
    Ok(home.join(".claude"))
}
