//! Utility functions for markdown line classification.
//!
//! Shared helper functions used by the heading scanner.

/// Deepest ATX heading level.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Maximum number of leading spaces allowed before a heading marker.
const MAX_INDENT: usize = 3;

/// Fence markers that open and close a fenced code block.
const FENCE_MARKERS: [&str; 2] = ["```", "~~~"];

/// Return the fence marker a line starts with, ignoring leading whitespace.
///
/// # Examples
///
/// ```
/// # use nohow::parser::utils::fence_marker;
/// assert_eq!(fence_marker("```rust"), Some("```"));
/// assert_eq!(fence_marker("  ~~~"), Some("~~~"));
/// assert_eq!(fence_marker("`inline`"), None);
/// ```
pub fn fence_marker(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    FENCE_MARKERS
        .into_iter()
        .find(|marker| trimmed.starts_with(*marker))
}

/// Extract the heading level from a line of markdown text.
///
/// Returns `Some(level)` if the line starts (after at most three spaces) with a
/// run of 1-6 `#` characters, or `None` otherwise. A space after the run is not
/// required, so `###Title` counts.
///
/// # Examples
///
/// ```
/// # use nohow::parser::utils::get_heading_level;
/// assert_eq!(get_heading_level("# Title"), Some(1));
/// assert_eq!(get_heading_level("###Compact"), Some(3));
/// assert_eq!(get_heading_level("not a heading"), None);
/// assert_eq!(get_heading_level("    # Code"), None);
/// ```
pub fn get_heading_level(line: &str) -> Option<usize> {
    let body = strip_indent(line)?;
    let level = body.bytes().take_while(|&b| b == b'#').count();

    if level > 0 && level <= MAX_HEADING_LEVEL {
        Some(level)
    } else {
        None
    }
}

/// Parse an ATX heading line into its level and decoration-free title.
///
/// The text after the marker run must be non-empty once trimmed. An optional
/// closing run of `#` characters is removed from the title.
///
/// # Examples
///
/// ```
/// # use nohow::parser::utils::parse_atx_heading;
/// assert_eq!(parse_atx_heading("## Setup ##"), Some((2, "Setup".to_string())));
/// assert_eq!(parse_atx_heading("##   "), None);
/// assert_eq!(parse_atx_heading("####### Seven"), None);
/// ```
pub fn parse_atx_heading(line: &str) -> Option<(usize, String)> {
    let level = get_heading_level(line)?;
    let body = strip_indent(line)?;

    let rest = body[level..].trim();
    if rest.is_empty() {
        return None;
    }

    Some((level, strip_closing_sequence(rest).to_string()))
}

/// Remove a trailing run of `#` characters and the whitespace before it.
///
/// # Examples
///
/// ```
/// # use nohow::parser::utils::strip_closing_sequence;
/// assert_eq!(strip_closing_sequence("Title ###"), "Title");
/// assert_eq!(strip_closing_sequence("No closing"), "No closing");
/// ```
pub fn strip_closing_sequence(text: &str) -> &str {
    text.trim_end().trim_end_matches('#').trim_end()
}

/// Iterator over source lines, breaking on `\n`, `\r\n` or a lone `\r`.
///
/// Like [`str::lines`], a trailing terminator does not produce an extra empty
/// line.
pub struct SourceLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SourceLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let Some(pos) = self.rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut self.rest));
        };

        let line = &self.rest[..pos];
        let terminator = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        self.rest = &self.rest[pos + terminator..];
        Some(line)
    }
}

/// Split `content` into lines the way the scanner counts them.
///
/// # Examples
///
/// ```
/// # use nohow::parser::utils::source_lines;
/// let lines: Vec<&str> = source_lines("a\rb\r\nc\n").collect();
/// assert_eq!(lines, vec!["a", "b", "c"]);
/// ```
pub fn source_lines(content: &str) -> SourceLines<'_> {
    SourceLines { rest: content }
}

fn strip_indent(line: &str) -> Option<&str> {
    let body = line.trim_start_matches(' ');
    if line.len() - body.len() > MAX_INDENT {
        None
    } else {
        Some(body)
    }
}
