use std::cell::RefCell;
use std::collections::HashMap;
use std::env::consts::EXE_SUFFIX;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use tempfile::TempDir;
use tunedl::core::{ReleaseAssets, ReleaseFetcher, ToolProvisioner, ToolSet};
use tunedl::ui::PlainReporter;
use tunedl::{Result, TunedlError};
use zip::write::SimpleFileOptions;

const DOWNLOADER_URL: &str = "https://releases.test/yt-dlp";
const ARCHIVE_URL: &str = "https://releases.test/ffmpeg.zip";

/// Serves canned payloads and records every requested URL
struct CountingFetcher {
    payloads: HashMap<String, Vec<u8>>,
    calls: RefCell<Vec<String>>,
}

impl CountingFetcher {
    fn new() -> Self {
        Self {
            payloads: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn serve(mut self, url: &str, body: Vec<u8>) -> Self {
        self.payloads.insert(url.to_string(), body);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ReleaseFetcher for CountingFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.borrow_mut().push(url.to_string());
        self.payloads
            .get(url)
            .cloned()
            .ok_or_else(|| TunedlError::provision(format!("HTTP 404 Not Found while downloading {}", url)))
    }
}

fn assets() -> ReleaseAssets {
    ReleaseAssets {
        downloader_url: DOWNLOADER_URL.to_string(),
        transcoder_archive_url: Some(ARCHIVE_URL.to_string()),
    }
}

fn ffmpeg_archive(top_folder: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let entries = [
        (format!("{}/bin/ffmpeg{}", top_folder, EXE_SUFFIX), "ffmpeg"),
        (format!("{}/bin/ffprobe{}", top_folder, EXE_SUFFIX), "ffprobe"),
        (format!("{}/LICENSE.txt", top_folder), "GPL"),
    ];
    for (name, data) in entries {
        writer.start_file(name, SimpleFileOptions::default()).unwrap();
        writer.write_all(data.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn place_tools(install_dir: &Path) -> ToolSet {
    let tools = ToolSet::expected(install_dir);
    fs::create_dir_all(tools.transcoder.parent().unwrap()).unwrap();
    fs::write(&tools.transcoder, "ffmpeg").unwrap();
    fs::write(&tools.downloader, "yt-dlp").unwrap();
    tools
}

#[test]
fn test_present_tools_need_no_network() {
    let temp = TempDir::new().unwrap();
    let install_dir = temp.path().join("YTMusicDownloader");
    let expected = place_tools(&install_dir);

    let fetcher = CountingFetcher::new();
    let reporter = PlainReporter::new(Vec::new());
    let provisioner = ToolProvisioner::new(&fetcher, &reporter, assets());

    let tools = provisioner.ensure_tools(&install_dir).unwrap();

    assert_eq!(tools, expected);
    assert!(fetcher.calls().is_empty());
    let output = reporter.contents();
    assert!(output.contains("[ok] FFmpeg found and ready to use."));
    assert!(output.contains("[ok] yt-dlp found and ready to use."));
}

#[test]
fn test_missing_tools_are_fetched_once_each() {
    let temp = TempDir::new().unwrap();
    let install_dir = temp.path().join("YTMusicDownloader");

    let fetcher = CountingFetcher::new()
        .serve(DOWNLOADER_URL, b"#!/bin/sh\necho yt-dlp\n".to_vec())
        .serve(ARCHIVE_URL, ffmpeg_archive("ffmpeg-master-latest-win64-gpl"));
    let reporter = PlainReporter::new(Vec::new());
    let provisioner = ToolProvisioner::new(&fetcher, &reporter, assets());

    let tools = provisioner.ensure_tools(&install_dir).unwrap();

    assert_eq!(fetcher.calls(), vec![ARCHIVE_URL, DOWNLOADER_URL]);
    assert_eq!(tools, ToolSet::expected(&install_dir));
    assert!(tools.downloader.is_file());
    assert!(tools.transcoder.is_file());
    assert!(install_dir.join("ffmpeg").join("LICENSE.txt").is_file());
    assert!(!install_dir
        .join("ffmpeg")
        .join("ffmpeg-master-latest-win64-gpl")
        .exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&tools.downloader).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    let output = reporter.contents();
    assert!(output.contains("[info] FFmpeg not found. Installing FFmpeg..."));
    assert!(output.contains("[ok] FFmpeg installed successfully!"));
    assert!(output.contains("[ok] yt-dlp downloaded successfully!"));
}

#[test]
fn test_only_the_missing_tool_is_fetched() {
    let temp = TempDir::new().unwrap();
    let install_dir = temp.path().join("tools");
    let tools = place_tools(&install_dir);
    fs::remove_file(&tools.downloader).unwrap();

    let fetcher = CountingFetcher::new().serve(DOWNLOADER_URL, b"binary".to_vec());
    let reporter = PlainReporter::new(Vec::new());
    let provisioner = ToolProvisioner::new(&fetcher, &reporter, assets());

    provisioner.ensure_tools(&install_dir).unwrap();

    assert_eq!(fetcher.calls(), vec![DOWNLOADER_URL]);
    assert_eq!(fs::read(&tools.downloader).unwrap(), b"binary");
}

#[test]
fn test_stale_transcoder_folder_is_replaced() {
    let temp = TempDir::new().unwrap();
    let install_dir = temp.path().join("tools");
    let tools = place_tools(&install_dir);
    fs::remove_file(&tools.transcoder).unwrap();
    let leftover = install_dir.join("ffmpeg").join("half-extracted.tmp");
    fs::write(&leftover, "junk").unwrap();

    let fetcher = CountingFetcher::new().serve(ARCHIVE_URL, ffmpeg_archive("build-2025"));
    let reporter = PlainReporter::new(Vec::new());
    let provisioner = ToolProvisioner::new(&fetcher, &reporter, assets());

    provisioner.ensure_tools(&install_dir).unwrap();

    assert_eq!(fetcher.calls(), vec![ARCHIVE_URL]);
    assert!(tools.transcoder.is_file());
    assert!(!leftover.exists());
}

#[test]
fn test_network_failure_is_fatal() {
    let temp = TempDir::new().unwrap();
    let install_dir = temp.path().join("tools");

    let fetcher = CountingFetcher::new();
    let reporter = PlainReporter::new(Vec::new());
    let provisioner = ToolProvisioner::new(&fetcher, &reporter, assets());

    let err = provisioner.ensure_tools(&install_dir).unwrap_err();

    assert!(matches!(err, TunedlError::Provision(_)));
    // No retry, and yt-dlp is never attempted once FFmpeg failed
    assert_eq!(fetcher.calls(), vec![ARCHIVE_URL]);
    assert!(reporter.contents().contains("[error] Failed to install FFmpeg:"));
}

#[test]
fn test_corrupt_archive_is_fatal() {
    let temp = TempDir::new().unwrap();
    let install_dir = temp.path().join("tools");

    let fetcher = CountingFetcher::new().serve(ARCHIVE_URL, b"PK-not-really".to_vec());
    let reporter = PlainReporter::new(Vec::new());
    let provisioner = ToolProvisioner::new(&fetcher, &reporter, assets());

    let err = provisioner.ensure_tools(&install_dir).unwrap_err();
    assert!(matches!(err, TunedlError::Archive(_)));
}

#[test]
fn test_archive_without_binary_is_fatal() {
    let temp = TempDir::new().unwrap();
    let install_dir = temp.path().join("tools");

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("build/README.txt", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"no binaries here").unwrap();
    let archive = writer.finish().unwrap().into_inner();

    let fetcher = CountingFetcher::new().serve(ARCHIVE_URL, archive);
    let reporter = PlainReporter::new(Vec::new());
    let provisioner = ToolProvisioner::new(&fetcher, &reporter, assets());

    let err = provisioner.ensure_tools(&install_dir).unwrap_err();
    assert!(err.to_string().contains("missing after extracting"));
}
