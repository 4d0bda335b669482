//! Path handling for the Zellij sandbox.

use std::path::PathBuf;

/// Returns the data directory for UserDeck traces.
///
/// The directory is `/host/.local/share/zellij/userdeck` in the sandbox. `/host`
/// is the cwd of the last focused terminal (or where Zellij was started), which
/// is usually the home directory, making the real path
/// `~/.local/share/zellij/userdeck`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("userdeck")
}

/// Expands a leading `~` to the sandbox's `/host` mount.
///
/// ```
/// use userdeck::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/nord.toml"), "/host/themes/nord.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
