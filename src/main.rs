use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use tunedl::commands;

fn main() -> Result<()> {
    tunedl::init_logging();

    let matches = Command::new("tunedl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Batch-download audio from a list of YouTube links using yt-dlp and FFmpeg")
        .long_about(
            "Batch-download audio from a list of YouTube links using yt-dlp and FFmpeg\n\n\
             Both tools are installed on first run. Anything not given as a flag is asked for \
             interactively.",
        )
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Text file with one link per line"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Folder for the audio files (empty means <Desktop>/Music)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Audio format passed to yt-dlp (default from config, usually mp3)"),
        )
        .arg(
            Arg::new("no-pause")
                .long("no-pause")
                .help("Exit without waiting for a key press")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("plain")
                .long("plain")
                .help("Print status lines without colors")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("tools")
                .about("Install yt-dlp and FFmpeg if missing and show their paths and versions"),
        )
        .subcommand(Command::new("version").about("Shows version information"))
        .get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("tools", sub_matches)) => commands::tools(sub_matches),
        Some(("version", _)) => commands::version(),
        _ => commands::download(&matches),
    }
}
