// Core business logic module

pub mod archive;
pub mod batch;
pub mod config;
pub mod downloader;
pub mod fetcher;
pub mod links;
pub mod provisioner;

// Re-export commonly used items
pub use batch::{BatchOptions, BatchRunner, RunSummary};
pub use config::Config;
pub use downloader::{AudioDownloader, DownloadOptions, ItemOutcome, YtDlpDownloader};
pub use fetcher::{HttpFetcher, ReleaseFetcher};
pub use links::LinkEntry;
pub use provisioner::{ReleaseAssets, ToolProvisioner, ToolSet};
