use std::borrow::Cow;
use std::env;
use std::fs::{self, File, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Length of the hex project identifier
const PROJECT_ID_LEN: usize = 16;

/// Stable identifier for a project working directory
///
/// First 16 hex characters of the MD5 digest of the path string.
///
/// # Examples
///
/// ```
/// use session_context::project_id;
///
/// let id = project_id("/Users/alice/code/app");
/// assert_eq!(id.len(), 16);
/// assert_eq!(id, project_id("/Users/alice/code/app"));
/// ```
pub fn project_id(path: &str) -> String {
    let digest = md5::compute(path.as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(PROJECT_ID_LEN);
    hex
}

/// Best-effort reverse of the host's project directory naming
///
/// The host flattens `/` (and `.`) into `-`, so the mapping is lossy: a `--` is read as
/// `/.` and any other `-` as `/`. Prefer the `cwd` recorded inside the log when present.
///
/// # Examples
///
/// ```
/// use session_context::decode_project_dir_name;
///
/// assert_eq!(decode_project_dir_name("-Users-foo--config"), "/Users/foo/.config");
/// ```
pub fn decode_project_dir_name(dir_name: &str) -> String {
    let path = dir_name.replace("--", "/.").replace('-', "/");
    if path.starts_with('/') { path } else { format!("/{}", path) }
}

/// Validates that a path is not a symlink
///
/// # Errors
///
/// Returns an error if the path metadata cannot be read or the path is a symlink.
pub fn validate_path_not_symlink(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
    if metadata.file_type().is_symlink() {
        bail!("Refusing to follow symlink: {}", path.display());
    }
    Ok(())
}

/// Opens a file for reading without following a final symlink
///
/// On unix the check happens atomically at open time (`O_NOFOLLOW`), so the file cannot
/// be swapped for a link between check and use.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is a symlink, or is not a regular file.
pub fn safe_open_file(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.read(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    #[cfg(not(unix))]
    validate_path_not_symlink(path)?;

    let file =
        options.open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
    if !metadata.is_file() {
        bail!("Not a regular file: {}", path.display());
    }

    Ok(file)
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
