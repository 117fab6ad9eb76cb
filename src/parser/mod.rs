//! Markdown parsing and TOC extraction.
//!
//! This module scans markdown for ATX headings (skipping fenced code blocks)
//! and builds them into an immutable [`TocTree`].

pub mod builder;
mod document;
pub mod scanner;
pub mod utils;

pub use builder::{HeadingArena, HeadingRecord, build_tree};
pub use document::Document;
pub use scanner::{Heading, HeadingScanner, ScannedDocument, TocOptions, scan};

use std::path::Path;

use crate::error::TocResult;
use crate::toc::TocTree;

/// Parse a markdown file and extract its table of contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_file(path: &Path, options: TocOptions) -> TocResult<Document> {
    let content = std::fs::read_to_string(path)?;
    Document::new(content, options)
}

/// Extract a TOC tree using every heading level.
pub fn parse_markdown(content: &str) -> TocResult<TocTree> {
    extract_toc(content, TocOptions::default())
}

/// Extract a TOC tree, keeping only headings inside the `options` window.
pub fn extract_toc(content: &str, options: TocOptions) -> TocResult<TocTree> {
    build_tree(scan(content, options))
}

/// Extract a TOC tree for the inclusive level range `min_level..=max_level`.
///
/// # Errors
///
/// Returns [`TocError::InvalidLevelRange`](crate::TocError::InvalidLevelRange)
/// before looking at `content` if the range is not within 1..=6.
pub fn extract_toc_with_levels(
    content: &str,
    min_level: usize,
    max_level: usize,
) -> TocResult<TocTree> {
    let options = TocOptions::new(min_level, max_level)?;
    extract_toc(content, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TocError;

    #[test]
    fn test_flatten_basic_book() {
        let md = "# Title\n## A\n### A.1\n## B\n# End\n";
        let tree = parse_markdown(md).unwrap();

        let flat: Vec<(usize, &str, usize, usize)> = tree
            .headings()
            .map(|n| (n.level(), n.title(), n.start_line(), n.end_line()))
            .collect();
        assert_eq!(
            flat,
            vec![
                (1, "Title", 1, 4),
                (2, "A", 2, 3),
                (3, "A.1", 3, 3),
                (2, "B", 4, 4),
                (1, "End", 5, 5),
            ]
        );
    }

    #[test]
    fn test_ignores_fenced_code_blocks() {
        let md = r#"
# Real

```
# Not a title
```

## Also real
"#;

        let tree = parse_markdown(md).unwrap();
        let titles: Vec<&str> = tree.headings().map(|n| n.title()).collect();
        assert_eq!(titles, vec!["Real", "Also real"]);
    }

    #[test]
    fn test_no_headings() {
        let tree = parse_markdown("Just a paragraph.\n\n- a list\n").unwrap();
        assert!(tree.is_empty());
        assert!(tree.flatten().is_empty());
    }

    #[test]
    fn test_level_window_changes_nesting() {
        let md = "# Book\n## Part\n### Chapter\n## Part 2";
        let tree = extract_toc_with_levels(md, 2, 6).unwrap();

        let top: Vec<&str> = tree.top_level().iter().map(|n| n.title()).collect();
        assert_eq!(top, vec!["Part", "Part 2"]);
        assert_eq!(tree.top_level()[0].children()[0].title(), "Chapter");
    }

    #[test]
    fn test_invalid_levels_rejected() {
        let err = extract_toc_with_levels("# A", 0, 6).unwrap_err();
        assert!(matches!(err, TocError::InvalidLevelRange { min: 0, max: 6 }));

        assert!(extract_toc_with_levels("# A", 3, 2).is_err());
        assert!(extract_toc_with_levels("# A", 1, 9).is_err());
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toc.md");
        std::fs::write(&path, "# One\n## Two\n").unwrap();

        let doc = parse_file(&path, TocOptions::default()).unwrap();
        assert_eq!(doc.tree().len(), 2);

        let missing = parse_file(&dir.path().join("nope.md"), TocOptions::default());
        assert!(matches!(missing, Err(TocError::Io(_))));
    }
}
