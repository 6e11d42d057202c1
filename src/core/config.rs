use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::batch::BatchOptions;
use crate::core::downloader::DownloadOptions;
use crate::error::{Result, TunedlError};

/// Persisted user settings, stored as JSON in the config directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target audio format handed to yt-dlp (`--audio-format`)
    pub audio_format: String,
    /// yt-dlp audio quality, `0` is best
    pub audio_quality: String,
    /// Pause after each processed link
    pub request_delay_ms: u64,
    /// Folder under the app data directory holding yt-dlp and ffmpeg
    pub toolset_folder: String,
    /// Output folder used on the previous run, offered as the prompt default
    pub last_output_dir: Option<String>,
    pub pause_on_exit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio_format: "mp3".to_string(),
            audio_quality: "0".to_string(),
            request_delay_ms: 1000,
            toolset_folder: "YTMusicDownloader".to_string(),
            last_output_dir: None,
            pause_on_exit: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&Self::get_config_path()?))
    }

    /// Load from an explicit path. A missing, empty or unreadable file gives
    /// the defaults (this can happen when the config format changes).
    pub fn load_from(path: &Path) -> Self {
        let data = match fs::read(path) {
            Ok(data) if !data.is_empty() => data,
            Ok(_) => return Self::default(),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to read config file {:?}: {}", path, e);
                }
                return Self::default();
            }
        };

        serde_json::from_slice(&data).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config file {:?}: {}", path, e);
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(self)
            .map_err(|e| TunedlError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, data)?;
        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TunedlError::config("Could not determine config directory"))?;

        Ok(config_dir.join("tunedl").join("config.json"))
    }

    /// Tool folder under the given app data directory
    pub fn toolset_dir(&self, app_data: &Path) -> PathBuf {
        app_data.join(&self.toolset_folder)
    }

    pub fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            audio_format: self.audio_format.clone(),
            audio_quality: self.audio_quality.clone(),
        }
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            request_delay: Duration::from_millis(self.request_delay_ms),
        }
    }

    pub fn set_last_output_dir(&mut self, path: &Path) {
        self.last_output_dir = Some(path.to_string_lossy().to_string());
    }
}
