// Sequential batch download loop

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::downloader::{AudioDownloader, ItemOutcome};
use crate::core::links::LinkEntry;
use crate::error::Result;
use crate::ui::StatusReporter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Pause after each processed link so requests are not fired back to back
    pub request_delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_secs(1),
        }
    }
}

/// Counters for one run.
///
/// `succeeded + failed == processed` and `processed + skipped == total_lines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_lines: usize,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub output_dir: PathBuf,
}

impl RunSummary {
    pub fn new(total_lines: usize, output_dir: PathBuf) -> Self {
        Self {
            total_lines,
            processed: 0,
            succeeded: 0,
            failed: 0,
            skipped: 0,
            output_dir,
        }
    }

    pub fn record(&mut self, outcome: &ItemOutcome) {
        self.processed += 1;
        match outcome {
            ItemOutcome::Success => self.succeeded += 1,
            ItemOutcome::Failure { .. } => self.failed += 1,
        }
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn report<R: StatusReporter>(&self, reporter: &R) {
        reporter.info("===== Summary =====");
        reporter.info(&format!("Total links: {}", self.total_lines));
        reporter.info(&format!("Skipped lines: {}", self.skipped));
        reporter.success(&format!("Downloaded successfully: {}", self.succeeded));
        if self.failed > 0 {
            reporter.error(&format!("Failed: {}", self.failed));
        } else {
            reporter.info("Failed: 0");
        }
        reporter.info(&format!(
            "Downloaded files are saved in: {}",
            self.output_dir.display()
        ));
    }
}

/// Create the output folder if needed
pub fn prepare_output_dir<R: StatusReporter>(path: &Path, reporter: &R) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)?;
        reporter.info(&format!("Created folder: {}", path.display()));
    }
    Ok(())
}

pub struct BatchRunner<'a, D: AudioDownloader, R: StatusReporter> {
    downloader: &'a D,
    reporter: &'a R,
    options: BatchOptions,
}

impl<'a, D: AudioDownloader, R: StatusReporter> BatchRunner<'a, D, R> {
    pub fn new(downloader: &'a D, reporter: &'a R, options: BatchOptions) -> Self {
        Self {
            downloader,
            reporter,
            options,
        }
    }

    /// Download every valid link in `lines`, one at a time.
    ///
    /// Blank and non-video lines are skipped without a message. A failed link
    /// is counted and reported; the loop always moves on to the next one.
    pub async fn run<S: AsRef<str>>(&self, lines: &[S], output_dir: &Path) -> Result<RunSummary> {
        prepare_output_dir(output_dir, self.reporter)?;

        let total = lines.len();
        let mut summary = RunSummary::new(total, output_dir.to_path_buf());
        self.reporter
            .info(&format!("Found {} links in the file.", total));

        for (i, line) in lines.iter().enumerate() {
            let entry = LinkEntry::parse(i + 1, line.as_ref());
            if !entry.valid {
                log::debug!("Skipping line {}: {:?}", entry.line_number, entry.raw);
                summary.record_skip();
                continue;
            }

            let outcome = self.process(&entry, total, output_dir).await;
            summary.record(&outcome);

            if !self.options.request_delay.is_zero() {
                tokio::time::sleep(self.options.request_delay).await;
            }
        }

        Ok(summary)
    }

    async fn process(&self, entry: &LinkEntry, total: usize, output_dir: &Path) -> ItemOutcome {
        let position = format!("[{}/{}]", entry.line_number, total);
        self.reporter
            .info(&format!("{} Downloading: {}", position, entry.trimmed));

        let outcome = self.downloader.download(&entry.trimmed, output_dir).await;

        match &outcome {
            ItemOutcome::Success => {
                self.reporter
                    .success(&format!("{} Downloaded successfully!", position));
            }
            ItemOutcome::Failure { reason } => {
                self.reporter
                    .error(&format!("{} Download failed: {}", position, reason));
            }
        }

        outcome
    }
}
