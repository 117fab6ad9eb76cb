//! Line-oriented ATX heading scanner.
//!
//! Walks the document once, skipping fenced code blocks, and yields every
//! heading whose level falls inside the configured window.

use tracing::trace;

use super::utils::{
    MAX_HEADING_LEVEL, SourceLines, fence_marker, parse_atx_heading, source_lines,
};
use crate::error::{TocError, TocResult};

/// Inclusive heading level window applied while scanning.
///
/// Headings outside the window are dropped before nesting, so they never
/// influence the shape of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocOptions {
    min_level: usize,
    max_level: usize,
}

impl TocOptions {
    /// Build a level window, rejecting anything outside `1 <= min <= max <= 6`.
    pub fn new(min_level: usize, max_level: usize) -> TocResult<Self> {
        if min_level < 1 || max_level > MAX_HEADING_LEVEL || min_level > max_level {
            return Err(TocError::InvalidLevelRange {
                min: min_level,
                max: max_level,
            });
        }
        Ok(Self {
            min_level,
            max_level,
        })
    }

    pub fn min_level(&self) -> usize {
        self.min_level
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Whether a heading at `level` is kept.
    pub fn includes(&self, level: usize) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            min_level: 1,
            max_level: MAX_HEADING_LEVEL,
        }
    }
}

/// A heading as found in the source, before nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1-6)
    pub level: usize,
    /// Title with markers and closing sequence removed
    pub title: String,
    /// Line number in source (1-indexed)
    pub line: usize,
}

/// Scanner output: the headings in document order and the document length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedDocument {
    pub headings: Vec<Heading>,
    pub line_count: usize,
}

/// Streaming heading iterator over a markdown string.
///
/// Tracks fence state across lines; once exhausted, [`lines_read`](Self::lines_read)
/// holds the total line count of the document.
pub struct HeadingScanner<'a> {
    lines: SourceLines<'a>,
    line_no: usize,
    open_fence: Option<&'static str>,
    options: TocOptions,
}

impl<'a> HeadingScanner<'a> {
    pub fn new(content: &'a str, options: TocOptions) -> Self {
        Self {
            lines: source_lines(content),
            line_no: 0,
            open_fence: None,
            options,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

/// Update fence state for `line`; returns true if the line must be skipped.
fn skip_fenced(open_fence: &mut Option<&'static str>, line: &str) -> bool {
    if let Some(marker) = fence_marker(line) {
        match *open_fence {
            None => *open_fence = Some(marker),
            Some(open) if open == marker => *open_fence = None,
            Some(_) => {}
        }
        return true;
    }
    open_fence.is_some()
}

impl Iterator for HeadingScanner<'_> {
    type Item = Heading;

    fn next(&mut self) -> Option<Heading> {
        for line in self.lines.by_ref() {
            self.line_no += 1;

            if skip_fenced(&mut self.open_fence, line) {
                trace!(line = self.line_no, "skipping fenced line");
                continue;
            }

            let Some((level, title)) = parse_atx_heading(line) else {
                continue;
            };
            if !self.options.includes(level) {
                continue;
            }

            return Some(Heading {
                level,
                title,
                line: self.line_no,
            });
        }
        None
    }
}

/// Scan `content` for headings inside the `options` level window.
pub fn scan(content: &str, options: TocOptions) -> ScannedDocument {
    let mut scanner = HeadingScanner::new(content, options);
    let headings: Vec<Heading> = scanner.by_ref().collect();

    ScannedDocument {
        headings,
        line_count: scanner.lines_read(),
    }
}
