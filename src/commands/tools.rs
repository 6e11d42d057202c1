use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::{Config, HttpFetcher, ReleaseAssets, ToolProvisioner, ToolSet};
use crate::platform::app_data_dir;
use crate::ui::{ColoredReporter, StatusReporter};

/// Install missing tools into the configured tool folder
pub fn provision_tools<R: StatusReporter>(config: &Config, reporter: &R) -> Result<ToolSet> {
    let install_dir = config.toolset_dir(&app_data_dir()?);
    let fetcher = HttpFetcher::new()?;
    let provisioner = ToolProvisioner::new(&fetcher, reporter, ReleaseAssets::for_current_platform());

    provisioner
        .ensure_tools(&install_dir)
        .with_context(|| format!("Could not prepare tools in {}", install_dir.display()))
}

pub fn execute(_matches: &clap::ArgMatches) -> Result<()> {
    let config = Config::load()?;
    let tools = provision_tools(&config, &ColoredReporter)?;

    println!();
    println!("{} {}", "Tool folder:".dimmed(), tools.install_dir.display());
    println!("{} {}", "yt-dlp:".dimmed(), tools.downloader.display());
    println!("{} {}", "ffmpeg:".dimmed(), tools.transcoder.display());

    let (downloader_version, transcoder_version) = tools.verify()?;
    println!();
    println!("{} {}", "yt-dlp version:".green(), downloader_version.yellow());
    println!("{} {}", "ffmpeg:".green(), transcoder_version.yellow());

    Ok(())
}
