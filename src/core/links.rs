// Link list parsing

use std::fs;
use std::path::Path;

use crate::error::{Result, TunedlError};

/// Substrings that mark a line as a supported video link
pub const HOST_MARKERS: [&str; 2] = ["youtube.com/", "youtu.be/"];

/// One line of the input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// 1-based position in the input file
    pub line_number: usize,
    pub raw: String,
    pub trimmed: String,
    pub valid: bool,
}

impl LinkEntry {
    pub fn parse(line_number: usize, raw: &str) -> Self {
        let trimmed = raw.trim().to_string();
        let valid = is_video_link(&trimmed);

        Self {
            line_number,
            raw: raw.to_string(),
            trimmed,
            valid,
        }
    }
}

/// A line is a video link iff it is non-blank and contains one of the host markers
pub fn is_video_link(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && HOST_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Parse every line, keeping their order
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<LinkEntry> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| LinkEntry::parse(i + 1, line.as_ref()))
        .collect()
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read the input file as lines.
///
/// A leading UTF-8 byte order mark is dropped. Bytes that are not valid
/// UTF-8 become U+FFFD instead of failing the read.
pub fn read_link_file(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(TunedlError::InputNotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path)?;
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
    Ok(String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect())
}
