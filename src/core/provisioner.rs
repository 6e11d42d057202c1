// Installs yt-dlp and ffmpeg into the tool folder on first use

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::archive::{extract_zip, flatten_single_root};
use crate::core::fetcher::ReleaseFetcher;
use crate::error::{Result, TunedlError};
use crate::platform::{exe_name, make_executable, remove_path};
use crate::ui::StatusReporter;

const YT_DLP_RELEASE_BASE: &str = "https://github.com/yt-dlp/yt-dlp/releases/latest/download";
const FFMPEG_WIN64_ARCHIVE: &str =
    "https://github.com/BtbN/FFmpeg-Builds/releases/download/latest/ffmpeg-master-latest-win64-gpl.zip";

/// Paths to the two external tools. Fixed once provisioning returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSet {
    pub install_dir: PathBuf,
    pub downloader: PathBuf,
    pub transcoder: PathBuf,
}

impl ToolSet {
    /// Where the tools live inside `install_dir`:
    /// `yt-dlp[.exe]` and `ffmpeg/bin/ffmpeg[.exe]`
    pub fn expected(install_dir: &Path) -> Self {
        Self {
            install_dir: install_dir.to_path_buf(),
            downloader: install_dir.join(exe_name("yt-dlp")),
            transcoder: install_dir
                .join("ffmpeg")
                .join("bin")
                .join(exe_name("ffmpeg")),
        }
    }

    /// Folder yt-dlp is pointed at with `--ffmpeg-location`
    pub fn transcoder_dir(&self) -> PathBuf {
        self.transcoder
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.install_dir.clone())
    }

    fn transcoder_root(&self) -> PathBuf {
        self.install_dir.join("ffmpeg")
    }

    /// First line of `yt-dlp --version` and `ffmpeg -version`
    pub fn verify(&self) -> Result<(String, String)> {
        let downloader = first_output_line(&self.downloader, "--version")?;
        let transcoder = first_output_line(&self.transcoder, "-version")?;
        Ok((downloader, transcoder))
    }
}

fn first_output_line(binary: &Path, flag: &str) -> Result<String> {
    let output = Command::new(binary).arg(flag).output().map_err(|e| {
        TunedlError::other(format!("Failed to execute {}: {}", binary.display(), e))
    })?;

    if !output.status.success() {
        return Err(TunedlError::other(format!(
            "{} {} failed with status: {}",
            binary.display(),
            flag,
            output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string())
}

/// Release download locations for one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAssets {
    pub downloader_url: String,
    /// ZIP archive with a single top-level folder holding `bin/ffmpeg`.
    /// `None` when no build is published for the platform.
    pub transcoder_archive_url: Option<String>,
}

impl ReleaseAssets {
    pub fn for_current_platform() -> Self {
        let downloader_asset = if cfg!(windows) {
            "yt-dlp.exe"
        } else if cfg!(target_os = "macos") {
            "yt-dlp_macos"
        } else {
            "yt-dlp_linux"
        };

        let transcoder_archive_url = if cfg!(all(windows, target_arch = "x86_64")) {
            Some(FFMPEG_WIN64_ARCHIVE.to_string())
        } else {
            None
        };

        Self {
            downloader_url: format!("{}/{}", YT_DLP_RELEASE_BASE, downloader_asset),
            transcoder_archive_url,
        }
    }
}

/// Makes sure both tools exist before a batch starts
pub struct ToolProvisioner<'a, F: ReleaseFetcher, R: StatusReporter> {
    fetcher: &'a F,
    reporter: &'a R,
    assets: ReleaseAssets,
}

impl<'a, F: ReleaseFetcher, R: StatusReporter> ToolProvisioner<'a, F, R> {
    pub fn new(fetcher: &'a F, reporter: &'a R, assets: ReleaseAssets) -> Self {
        Self {
            fetcher,
            reporter,
            assets,
        }
    }

    /// Install whatever is missing under `install_dir` and return the tool paths.
    ///
    /// Each missing tool costs exactly one fetch; a present tool costs none.
    /// Any failure is fatal and nothing is retried.
    pub fn ensure_tools(&self, install_dir: &Path) -> Result<ToolSet> {
        fs::create_dir_all(install_dir)?;
        let mut tools = ToolSet::expected(install_dir);

        if tools.transcoder.is_file() {
            self.reporter.success("FFmpeg found and ready to use.");
        } else if let Some(url) = &self.assets.transcoder_archive_url {
            self.reporter.info("FFmpeg not found. Installing FFmpeg...");
            self.install_transcoder(url, &tools).inspect_err(|e| {
                self.reporter
                    .error(&format!("Failed to install FFmpeg: {}", e))
            })?;
            self.reporter.success("FFmpeg installed successfully!");
        } else {
            tools.transcoder = Self::system_transcoder()?;
            self.reporter.success(&format!(
                "Using FFmpeg from PATH: {}",
                tools.transcoder.display()
            ));
        }

        if tools.downloader.is_file() {
            self.reporter.success("yt-dlp found and ready to use.");
        } else {
            self.reporter.info("yt-dlp not found. Downloading yt-dlp...");
            self.install_downloader(&tools.downloader).inspect_err(|e| {
                self.reporter
                    .error(&format!("Failed to download yt-dlp: {}", e))
            })?;
            self.reporter.success("yt-dlp downloaded successfully!");
        }

        Ok(tools)
    }

    fn install_downloader(&self, target: &Path) -> Result<()> {
        let bytes = self.fetcher.fetch(&self.assets.downloader_url)?;
        fs::write(target, bytes)?;
        make_executable(target)?;
        Ok(())
    }

    fn install_transcoder(&self, url: &str, tools: &ToolSet) -> Result<()> {
        let bytes = self.fetcher.fetch(url)?;

        let root = tools.transcoder_root();
        remove_path(&root)?;
        fs::create_dir_all(&root)?;

        self.reporter.info("Extracting FFmpeg...");
        extract_zip(bytes, &root)?;
        flatten_single_root(&root)?;

        if !tools.transcoder.is_file() {
            return Err(TunedlError::provision(format!(
                "{} missing after extracting the FFmpeg archive",
                tools.transcoder.display()
            )));
        }

        make_executable(&tools.transcoder)?;
        Ok(())
    }

    fn system_transcoder() -> Result<PathBuf> {
        which::which("ffmpeg").map_err(|_| {
            TunedlError::provision(
                "No FFmpeg build is published for this platform and ffmpeg is not on PATH",
            )
        })
    }
}
