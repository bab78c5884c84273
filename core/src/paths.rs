use std::path::Path;
use std::path::PathBuf;

use dirs::config_dir;

/// Filename Claude Desktop reads its MCP server registry from.
pub const CONFIG_FILENAME: &str = "claude_desktop_config.json";

/// Directory override consulted before the platform default. Used by the
/// integration tests and by installs onto relocated user profiles.
pub const CONFIG_DIR_ENV_VAR: &str = "MCPREG_CLAUDE_CONFIG_DIR";

/// Returns the directory holding the host configuration:
/// `$MCPREG_CLAUDE_CONFIG_DIR` when set, otherwise the per-user
/// configuration directory (Roaming AppData on Windows, Application
/// Support on macOS, XDG config on Linux) plus the `Claude` vendor
/// folder. Does not verify that the directory exists.
pub fn claude_config_dir() -> std::io::Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV_VAR) {
        return Ok(PathBuf::from(dir));
    }

    let mut p = config_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine the user configuration directory",
        )
    })?;
    p.push("Claude");
    Ok(p)
}

/// Full path of `claude_desktop_config.json` for the current user.
pub fn claude_config_path() -> std::io::Result<PathBuf> {
    Ok(claude_config_dir()?.join(CONFIG_FILENAME))
}

/// Sibling path the document is copied to for the duration of a
/// transaction.
pub fn backup_path(document: &Path) -> PathBuf {
    let mut os = document.as_os_str().to_owned();
    os.push(".backup");
    PathBuf::from(os)
}
