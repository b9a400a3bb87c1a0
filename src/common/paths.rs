//! Endpoint and configuration paths
//!
//! Unix: the service socket lives in the reserved socket directory
//! (`/dev/socket/<name>` on Android)
//! Windows: the endpoint is a namespaced pipe named after the service socket

use std::path::{Path, PathBuf};

/// Application name used for config directories
const APP_NAME: &str = "bugreportz";

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV: &str = "BUGREPORTZ_CONFIG";

/// Resolve an endpoint name to the socket path inside `socket_dir`
///
/// Names that already contain a path separator are used as-is, so a
/// config or command line can point at any socket file.
pub fn socket_path(socket_dir: &Path, name: &str) -> PathBuf {
    if name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
        PathBuf::from(name)
    } else {
        socket_dir.join(name)
    }
}

/// Get the endpoint name for interprocess local sockets
///
/// Returns a string suitable for use with interprocess crate's local socket API
#[cfg(unix)]
pub fn socket_name(socket_dir: &Path, name: &str) -> String {
    socket_path(socket_dir, name).to_string_lossy().into_owned()
}

#[cfg(windows)]
pub fn socket_name(_socket_dir: &Path, name: &str) -> String {
    name.to_string()
}

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/bugreportz/`
/// - macOS: `~/Library/Application Support/bugreportz/`
/// - Windows: `%APPDATA%\bugreportz\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
///
/// `BUGREPORTZ_CONFIG` takes precedence over the platform location.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    config_dir().map(|dir| dir.join("config.toml"))
}
