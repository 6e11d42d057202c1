use anyhow::{Context, Result};
use std::io;
use std::path::Path;

use crate::commands::tools::provision_tools;
use crate::core::links::read_link_file;
use crate::core::{BatchRunner, Config, YtDlpDownloader};
use crate::error::TunedlError;
use crate::platform::{desktop_dir, resolve_output_dir};
use crate::ui::{
    output_folder_prompt, prompt_path, trim_path_input, wait_for_keypress, ColoredReporter,
    PlainReporter, StatusReporter,
};

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(format) = matches.get_one::<String>("format") {
        config.audio_format = format.clone();
    }
    let pause = config.pause_on_exit && !matches.get_flag("no-pause");

    if matches.get_flag("plain") {
        let reporter = PlainReporter::new(io::stdout());
        run(matches, &mut config, &reporter, pause)
    } else {
        run(matches, &mut config, &ColoredReporter, pause)
    }
}

fn run<R: StatusReporter>(
    matches: &clap::ArgMatches,
    config: &mut Config,
    reporter: &R,
    pause: bool,
) -> Result<()> {
    reporter.info("===== YouTube Music Downloader =====");

    // 1. Tools first: nothing can run without them
    let tools = provision_tools(config, reporter)?;

    // 2. Link file
    let input = match matches.get_one::<String>("input") {
        Some(path) => trim_path_input(path).to_string(),
        None => prompt_path("Path to the text file with YouTube links (e.g. D:\\songs.txt)")?,
    };

    let lines = match read_link_file(Path::new(&input)) {
        Ok(lines) => lines,
        Err(TunedlError::InputNotFound(path)) => {
            reporter.error(&format!("Error: the file {} does not exist!", path.display()));
            return pause_before_exit(pause);
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", input)),
    };

    // 3. Output folder, blank means <Desktop>/Music
    let answer = match matches.get_one::<String>("output") {
        Some(path) => trim_path_input(path).to_string(),
        None => prompt_path(&output_folder_prompt(config.last_output_dir.as_deref()))?,
    };
    let desktop = desktop_dir();
    let output_dir = resolve_output_dir(&answer, desktop.as_deref())?;

    // 4. Batch
    let downloader = YtDlpDownloader::new(tools, config.download_options());
    let runner = BatchRunner::new(&downloader, reporter, config.batch_options());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    let summary = runtime
        .block_on(runner.run(&lines, &output_dir))
        .with_context(|| format!("Failed to prepare {}", output_dir.display()))?;

    println!();
    summary.report(reporter);

    config.set_last_output_dir(&output_dir);
    if let Err(e) = config.save() {
        log::warn!("Could not save configuration: {}", e);
    }

    pause_before_exit(pause)
}

fn pause_before_exit(pause: bool) -> Result<()> {
    if pause {
        wait_for_keypress("Press any key to exit...")?;
    }
    Ok(())
}
