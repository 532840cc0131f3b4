//! Fixed-count caption chunking.
//!
//! Groups consecutive captions into windows of exactly `chunk_size`; windows
//! never overlap, and a trailing window that never fills up is discarded.

use super::{ChunkDraft, ChunkedTranscript, ChunkingConfig};
use crate::transcript::TranscriptFile;
use crate::video_id::extract_video_id;
use tracing::{debug, warn};

/// Caption-count chunker.
pub struct CaptionChunker {
    config: ChunkingConfig,
}

impl CaptionChunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Split one transcript into chunk drafts. Ids are assigned later, once
    /// every file of the corpus has been chunked.
    pub fn chunk(&self, file: &TranscriptFile) -> ChunkedTranscript {
        let name = file.name();
        let header = file.header();

        if !header.is_complete() {
            warn!("{}: header incomplete, using fallback title/empty video id", name);
        }

        let video_title = header.title_or(&self.config.fallback_title);
        let video_id = header
            .source_url
            .as_deref()
            .map(extract_video_id)
            .unwrap_or_default();

        if video_id.is_empty() {
            if let Some(url) = &header.source_url {
                warn!("{}: no video id in source URL '{}'", name, url);
            }
        }

        let chunk_size = self.config.chunk_size.max(1);
        let mut drafts = Vec::new();
        let mut buffer: Vec<String> = Vec::with_capacity(chunk_size);
        let mut start_time = 0;

        for caption in file.captions() {
            if buffer.is_empty() {
                start_time = caption.offset_seconds;
            }
            buffer.push(caption.text);

            if buffer.len() == chunk_size {
                drafts.push(ChunkDraft {
                    start_time,
                    text: buffer.join(" "),
                });
                buffer.clear();
            }
        }

        if !buffer.is_empty() {
            debug!(
                "{}: dropping {} trailing caption(s) short of a full chunk",
                name,
                buffer.len()
            );
        }

        ChunkedTranscript {
            name,
            video_title,
            video_id,
            drafts,
            dropped_captions: buffer.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(captions: &[(&str, &str)]) -> TranscriptFile {
        let mut content = String::from("WEBVTT\n#Episode 42\n#https://youtu.be/abc123\n\n");
        for (stamp, text) in captions {
            content.push_str(&format!("{} {}\n", stamp, text));
        }
        TranscriptFile::new("ep42.txt", content)
    }

    fn chunker(chunk_size: usize) -> CaptionChunker {
        CaptionChunker::new(ChunkingConfig {
            chunk_size,
            ..ChunkingConfig::default()
        })
    }

    #[test]
    fn test_groups_of_three() {
        let file = transcript(&[
            ("00:00:01.000", "One"),
            ("00:00:02.000", "Two"),
            ("00:00:03.000", "Three"),
            ("00:00:04.900", "Four"),
            ("00:00:05.000", "Five"),
            ("00:00:06.000", "Six"),
            ("00:00:07.000", "Seven"),
        ]);

        let chunked = chunker(3).chunk(&file);

        assert_eq!(chunked.video_title, "Episode 42");
        assert_eq!(chunked.video_id, "abc123");
        assert_eq!(
            chunked.drafts,
            vec![
                ChunkDraft { start_time: 1, text: "One Two Three".to_string() },
                ChunkDraft { start_time: 4, text: "Four Five Six".to_string() },
            ]
        );
        assert_eq!(chunked.dropped_captions, 1);
    }

    #[test]
    fn test_partial_group_only() {
        let file = transcript(&[("00:00:01.000", "One"), ("00:00:02.000", "Two")]);
        let chunked = chunker(3).chunk(&file);

        assert!(chunked.drafts.is_empty());
        assert_eq!(chunked.dropped_captions, 2);
    }

    #[test]
    fn test_chunk_size_one() {
        let file = transcript(&[("00:01:00.000", "A"), ("00:02:00.000", "B")]);
        let chunked = chunker(1).chunk(&file);

        let starts: Vec<u32> = chunked.drafts.iter().map(|d| d.start_time).collect();
        assert_eq!(starts, [60, 120]);
        assert_eq!(chunked.dropped_captions, 0);
    }

    #[test]
    fn test_non_caption_lines_do_not_break_groups() {
        let content = "WEBVTT\n#T\n#https://www.youtube.com/watch?v=zzz\n\
            00:00:01.000 a\n\
            \n\
            NOTE something\n\
            00:00:02.000 b\n\
            00:00:03.000 c\n";
        let chunked = chunker(3).chunk(&TranscriptFile::new("t.txt", content));

        assert_eq!(chunked.drafts.len(), 1);
        assert_eq!(chunked.drafts[0].text, "a b c");
        assert_eq!(chunked.video_id, "zzz");
    }

    #[test]
    fn test_bare_timestamp_keeps_group_boundaries() {
        let file = transcript(&[
            ("00:00:01.000", "a"),
            ("00:00:02.000", ""),
            ("00:00:03.000", "c"),
            ("00:00:04.000", "d"),
        ]);
        let chunked = chunker(3).chunk(&file);

        assert_eq!(
            chunked.drafts,
            vec![ChunkDraft { start_time: 1, text: "a  c".to_string() }]
        );
        assert_eq!(chunked.dropped_captions, 1);
    }

    #[test]
    fn test_missing_header_falls_back() {
        let chunked = chunker(3).chunk(&TranscriptFile::new("bare.txt", "00:00:01.000 x\n"));

        assert_eq!(chunked.video_title, ChunkingConfig::default().fallback_title);
        assert_eq!(chunked.video_id, "");
        assert!(chunked.drafts.is_empty());
    }
}
