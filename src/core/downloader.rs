// yt-dlp invocation and outcome classification

use std::ffi::OsString;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::core::provisioner::ToolSet;
use crate::error::{Result, TunedlError};

/// Marker yt-dlp puts in front of informational stderr lines
pub const INFO_MARKER: &str = "INFO:";

/// Result of one download attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Success,
    Failure { reason: String },
}

impl ItemOutcome {
    pub fn failure<S: Into<String>>(reason: S) -> Self {
        ItemOutcome::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Success)
    }
}

/// Audio extraction settings passed to yt-dlp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    pub audio_format: String,
    pub audio_quality: String,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            audio_format: "mp3".to_string(),
            audio_quality: "0".to_string(),
        }
    }
}

/// Captured output of a finished downloader process
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Something that turns one link into an audio file in `output_dir`
pub trait AudioDownloader {
    fn download(&self, link: &str, output_dir: &Path) -> impl Future<Output = ItemOutcome>;
}

/// Runs yt-dlp as a child process
pub struct YtDlpDownloader {
    tools: ToolSet,
    options: DownloadOptions,
}

impl YtDlpDownloader {
    pub fn new(tools: ToolSet, options: DownloadOptions) -> Self {
        Self { tools, options }
    }

    /// Launch yt-dlp, drain both pipes concurrently and wait for it to exit
    pub async fn run(&self, link: &str, output_dir: &Path) -> Result<ProcessOutput> {
        let args = build_arguments(link, output_dir, &self.tools.transcoder_dir(), &self.options);
        log::debug!("Running {:?} {:?}", self.tools.downloader, args);

        let mut cmd = Command::new(&self.tools.downloader);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        let mut child = cmd.spawn()?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| TunedlError::other("yt-dlp stdout was not captured"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| TunedlError::other("yt-dlp stderr was not captured"))?;

        // Both pipes must be read at the same time or the child can block on a full buffer
        let mut out_buf = Vec::new();
        let mut err_buf = Vec::new();
        let (out_res, err_res) = tokio::join!(
            stdout.read_to_end(&mut out_buf),
            stderr.read_to_end(&mut err_buf)
        );
        out_res?;
        err_res?;

        let status = child.wait().await?;

        Ok(ProcessOutput {
            exit_code: status.code(),
            stdout: String::from_utf8_lossy(&out_buf).into_owned(),
            stderr: String::from_utf8_lossy(&err_buf).into_owned(),
        })
    }
}

impl AudioDownloader for YtDlpDownloader {
    async fn download(&self, link: &str, output_dir: &Path) -> ItemOutcome {
        match self.run(link, output_dir).await {
            Ok(output) => {
                log::debug!("yt-dlp exited with {:?}", output.exit_code);
                classify(output.exit_code, &output.stderr)
            }
            Err(e) => ItemOutcome::failure(format!("Failed to run yt-dlp: {}", e)),
        }
    }
}

/// Command line for one audio download
pub fn build_arguments(
    link: &str,
    output_dir: &Path,
    transcoder_dir: &Path,
    options: &DownloadOptions,
) -> Vec<OsString> {
    vec![
        "-x".into(),
        "--audio-format".into(),
        options.audio_format.clone().into(),
        "--audio-quality".into(),
        options.audio_quality.clone().into(),
        "--ffmpeg-location".into(),
        transcoder_dir.as_os_str().to_os_string(),
        "-o".into(),
        output_dir.join("%(title)s.%(ext)s").into_os_string(),
        link.into(),
    ]
}

/// True when stderr has content and at least one line is not informational
pub fn has_error_output(stderr: &str) -> bool {
    stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .any(|line| !line.starts_with(INFO_MARKER))
}

/// Decide the outcome from the exit code and stderr.
///
/// Error output wins over a zero exit code. This heuristic can flag plain
/// warnings as failures.
pub fn classify(exit_code: Option<i32>, stderr: &str) -> ItemOutcome {
    if has_error_output(stderr) {
        return ItemOutcome::failure(stderr.trim());
    }

    match exit_code {
        Some(0) => ItemOutcome::Success,
        Some(code) => ItemOutcome::failure(format!("yt-dlp exited with code {}", code)),
        None => ItemOutcome::failure("yt-dlp was terminated by a signal"),
    }
}
