//! Raw transcript files.
//!
//! A transcript is a plain-text file whose second and third lines carry the
//! video title and source URL, each behind a one-character marker:
//!
//! ```text
//! WEBVTT
//! #Joe Rogan Experience #1234 - Some Guest
//! #https://www.youtube.com/watch?v=abc123
//!
//! 00:00:01.000 first caption
//! 00:00:04.250 second caption
//! ```
//!
//! Every line starting with a `HH:MM:SS.fraction` timestamp followed by
//! whitespace or the end of the line is a caption; all other lines are
//! ignored. A bare timestamp is a caption with empty text.

mod timestamp;

pub use timestamp::{format_timestamp, parse_timestamp};

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static CAPTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]+)(?:\s+(.*))?$").expect("Invalid regex")
});

/// One transcript file loaded into memory.
#[derive(Debug, Clone)]
pub struct TranscriptFile {
    path: PathBuf,
    content: String,
}

impl TranscriptFile {
    /// Wrap already-read file content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Path the transcript was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for log and report output.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Raw lines, without line terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }

    /// Title and URL from the fixed header positions.
    pub fn header(&self) -> TranscriptHeader {
        let mut lines = self.lines().skip(1);
        TranscriptHeader {
            title: lines.next().and_then(header_value),
            source_url: lines.next().and_then(header_value),
        }
    }

    /// Caption lines in file order.
    ///
    /// Lines that look like captions but carry an unparseable timestamp are
    /// skipped.
    pub fn captions(&self) -> impl Iterator<Item = Caption> + '_ {
        self.lines().filter_map(move |line| {
            let caps = CAPTION_LINE.captures(line)?;
            let stamp = caps.get(1)?.as_str();
            match parse_timestamp(stamp) {
                Ok(offset_seconds) => Some(Caption {
                    offset_seconds,
                    text: caps.get(2).map(|m| m.as_str()).unwrap_or_default().to_string(),
                }),
                Err(e) => {
                    debug!("Skipping caption line in {}: {}", self.path.display(), e);
                    None
                }
            }
        })
    }
}

/// Strip the one-character marker and surrounding whitespace.
fn header_value(line: &str) -> Option<String> {
    let mut chars = line.chars();
    chars.next()?;
    let value = chars.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Header fields of a transcript, each absent when the line is missing or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptHeader {
    pub title: Option<String>,
    pub source_url: Option<String>,
}

impl TranscriptHeader {
    /// Whether both header lines were present.
    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.source_url.is_some()
    }

    /// The title, or `fallback` when the header had none.
    pub fn title_or(&self, fallback: &str) -> String {
        self.title.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// A single timestamped caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    /// Offset from the start of the video in whole seconds.
    pub offset_seconds: u32,
    /// Caption text as written in the file.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "WEBVTT\n\
        #Episode 1 - Guest\n\
        #https://www.youtube.com/watch?v=abc123\n\
        \n\
        00:00:01.000 Hello there.\n\
        not a caption\n\
        00:01:02.500   General Kenobi!\n\
        1:00:00.000 bad hours width\n\
        00:02:00 missing fraction\n";

    #[test]
    fn test_header() {
        let file = TranscriptFile::new("ep1.txt", SAMPLE);
        let header = file.header();

        assert_eq!(header.title.as_deref(), Some("Episode 1 - Guest"));
        assert_eq!(header.source_url.as_deref(), Some("https://www.youtube.com/watch?v=abc123"));
        assert!(header.is_complete());
    }

    #[test]
    fn test_header_missing_lines() {
        let file = TranscriptFile::new("short.txt", "WEBVTT\n#Only a title\n");
        let header = file.header();
        assert_eq!(header.title.as_deref(), Some("Only a title"));
        assert_eq!(header.source_url, None);
        assert!(!header.is_complete());

        let empty = TranscriptFile::new("empty.txt", "");
        assert_eq!(empty.header(), TranscriptHeader::default());
        assert_eq!(empty.header().title_or("Fallback"), "Fallback");
    }

    #[test]
    fn test_header_strips_multibyte_marker() {
        let file = TranscriptFile::new("x.txt", "WEBVTT\n»Título\n»https://youtu.be/xyz\n");
        let header = file.header();
        assert_eq!(header.title.as_deref(), Some("Título"));
        assert_eq!(header.source_url.as_deref(), Some("https://youtu.be/xyz"));
    }

    #[test]
    fn test_captions() {
        let file = TranscriptFile::new("ep1.txt", SAMPLE);
        let captions: Vec<Caption> = file.captions().collect();

        assert_eq!(
            captions,
            vec![
                Caption { offset_seconds: 1, text: "Hello there.".to_string() },
                Caption { offset_seconds: 62, text: "General Kenobi!".to_string() },
            ]
        );
    }

    #[test]
    fn test_bare_timestamp_is_empty_caption() {
        let file = TranscriptFile::new(
            "bare.txt",
            "WEBVTT\n#T\n#U\n00:00:01.000 a\n00:00:02.000\n00:00:03.000   \n00:00:04.000x\n",
        );
        let captions: Vec<Caption> = file.captions().collect();

        assert_eq!(
            captions,
            vec![
                Caption { offset_seconds: 1, text: "a".to_string() },
                Caption { offset_seconds: 2, text: String::new() },
                Caption { offset_seconds: 3, text: String::new() },
            ]
        );
    }

    #[test]
    fn test_name() {
        let file = TranscriptFile::new("/data/raw/ep1.txt", "");
        assert_eq!(file.name(), "ep1.txt");
    }
}
