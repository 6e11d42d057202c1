// Well-known directories and executable naming

use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

use crate::error::{Result, TunedlError};

/// Folder created under the desktop when no output folder is given
pub const DEFAULT_OUTPUT_FOLDER: &str = "Music";

/// File name of an executable on the current platform (`ffmpeg` -> `ffmpeg.exe` on Windows)
pub fn exe_name(stem: &str) -> String {
    format!("{}{}", stem, EXE_SUFFIX)
}

/// Per-user application data directory (`%LOCALAPPDATA%`, `~/.local/share`, ...)
pub fn app_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .ok_or_else(|| TunedlError::config("Could not determine the local data directory"))
}

/// The user's desktop, falling back to `<home>/Desktop` when the platform
/// does not report one.
pub fn desktop_dir() -> Option<PathBuf> {
    dirs::desktop_dir().or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
}

/// Resolve the output folder answer. A blank answer maps to `<desktop>/Music`.
pub fn resolve_output_dir(answer: &str, desktop: Option<&Path>) -> Result<PathBuf> {
    let answer = answer.trim();
    if !answer.is_empty() {
        return Ok(PathBuf::from(answer));
    }

    desktop
        .map(|dir| dir.join(DEFAULT_OUTPUT_FOLDER))
        .ok_or_else(|| TunedlError::config("Could not determine the desktop directory"))
}
