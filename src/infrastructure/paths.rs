//! Path helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! normally resolves to the directory Zellij was started from (usually `~`).

use std::path::PathBuf;

/// File name of the credential store inside the data directory.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// File name of the OTLP trace log inside the data directory.
pub const TRACE_FILE: &str = "flagfinder-otlp.json";

/// Returns the plugin's data directory, `/host/.local/share/zellij/flagfinder`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("flagfinder")
}

/// Path of the JSON credential store.
#[must_use]
pub fn credentials_path() -> PathBuf {
    get_data_dir().join(CREDENTIALS_FILE)
}

/// Rewrites a `~`-prefixed path to its `/host` sandbox equivalent.
///
/// ```
/// use flagfinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
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
