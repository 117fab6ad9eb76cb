//! Section extraction by line range.
//!
//! Chapter generation works from the slice of TOC source a node owns: its
//! heading line through its end line.

use super::TocNode;
use crate::parser::utils::source_lines;

/// Lines `start_line..=end_line` of `source` (1-indexed, clamped to the document).
pub fn section_lines<'a>(source: &'a str, node: &TocNode) -> Vec<&'a str> {
    let first = node.start_line().max(1);
    if node.end_line() < first {
        return Vec::new();
    }

    source_lines(source)
        .skip(first - 1)
        .take(node.end_line() - first + 1)
        .collect()
}

/// The owned lines of `node`, joined with `\n`.
pub fn section_text(source: &str, node: &TocNode) -> String {
    section_lines(source, node).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;

    #[test]
    fn test_section_lines_follow_node_range() {
        let md = "# A\none\n## B\ntwo\n# C\nthree";
        let tree = parse_markdown(md).unwrap();

        let b = tree.find_by_key("0.0").unwrap().unwrap();
        assert_eq!(section_lines(md, b), vec!["## B", "two"]);

        let a = tree.find_by_key("0").unwrap().unwrap();
        assert_eq!(section_text(md, a), "# A\none\n## B\ntwo");
    }

    #[test]
    fn test_root_section_covers_headed_span() {
        let md = "preface\n# A\nbody";
        let tree = parse_markdown(md).unwrap();

        assert_eq!(section_text(md, tree.root()), "# A\nbody");
    }

    #[test]
    fn test_empty_root_has_no_lines() {
        let md = "no headings";
        let tree = parse_markdown(md).unwrap();

        assert!(section_lines(md, tree.root()).is_empty());
    }

    #[test]
    fn test_range_past_end_is_clamped() {
        let md = "# A\nbody";
        let tree = parse_markdown(md).unwrap();

        // Same tree against a shorter revision of the source
        assert_eq!(section_lines("# A", &tree.top_level()[0]), vec!["# A"]);
    }

    #[test]
    fn test_section_lines_match_scanner_line_breaks() {
        let md = "# A\rone\r# B\rtwo";
        let tree = parse_markdown(md).unwrap();

        let b = tree.find_by_key("1").unwrap().unwrap();
        assert_eq!((b.start_line(), b.end_line()), (3, 4));
        assert_eq!(section_lines(md, b), vec!["# B", "two"]);
    }
}
