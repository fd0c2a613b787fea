//! Path helpers for the Zellij sandbox, where the host filesystem is mounted
//! under `/host`.

use std::path::PathBuf;

/// Default home of the store, settings and log files.
///
/// `/host` maps to the directory Zellij was started from, which is usually the
/// user's home, so this is normally `~/.local/share/zellij/shopdash`.
///
/// ```
/// use shopdash::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/shopdash"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("shopdash")
}

/// Rewrites a leading `~` to the sandbox mount point.
///
/// ```
/// use shopdash::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/shop/store.json"), "/host/shop/store.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/store.json"), "/tmp/store.json");
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

/// Drops the `/host` prefix so paths read as they do on the host.
///
/// Only a whole leading component is stripped; `/hostname` is left alone.
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    match path.strip_prefix("/host") {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}
