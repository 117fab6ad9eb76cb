//! Immutable, addressable TOC tree.
//!
//! A [`TocTree`] is produced once by [`crate::parser::extract_toc`] and never
//! mutated afterwards. Nodes are addressed by their index path (sibling
//! ordinals from the root), rendered as a dotted conversation key such as
//! `"0.1.2"`. Keys are positional: inserting or reordering headings in the
//! source shifts the keys of every later sibling and their descendants.

pub mod render;
pub mod section;

use serde::{Deserialize, Serialize};

use crate::error::{TocError, TocResult};

/// Title of the synthetic node wrapping all top-level headings.
pub const ROOT_TITLE: &str = "ROOT";

/// A heading in the frozen tree, or the synthetic root.
///
/// The serialized field names (`key`, `level`, `index`, `title`,
/// `start_line`, `end_line`, `children`) are the stored blob format; every
/// field is required when loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocNode {
    /// Preorder ordinal within the tree (root = 0)
    key: usize,
    /// Heading level, 0 for the root
    level: usize,
    /// Sibling ordinals from the root down to this node
    index: Vec<usize>,
    title: String,
    /// First line owned by this node (1-indexed, 0 for an empty root)
    start_line: usize,
    /// Last line owned by this node, inclusive
    end_line: usize,
    children: Vec<TocNode>,
}

impl TocNode {
    pub(crate) fn new(
        key: usize,
        level: usize,
        index: Vec<usize>,
        title: String,
        (start_line, end_line): (usize, usize),
        children: Vec<TocNode>,
    ) -> Self {
        Self {
            key,
            level,
            index,
            title,
            start_line,
            end_line,
            children,
        }
    }

    /// Build the synthetic root spanning its direct children.
    pub(crate) fn root(children: Vec<TocNode>) -> Self {
        let start = children.iter().map(|c| c.start_line).min().unwrap_or(0);
        let end = children.iter().map(|c| c.end_line).max().unwrap_or(0);
        Self::new(0, 0, Vec::new(), ROOT_TITLE.to_string(), (start, end), children)
    }

    pub fn key(&self) -> usize {
        self.key
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn end_line(&self) -> usize {
        self.end_line
    }

    pub fn children(&self) -> &[TocNode] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// Dot-joined index path, e.g. `"0.1"` for the second child of the
    /// first top-level heading. The root's key is the empty string.
    pub fn conversation_key(&self) -> String {
        format_conversation_key(&self.index)
    }

    /// Whether `other`'s line range lies within this node's range.
    pub fn contains_range(&self, other: &TocNode) -> bool {
        self.start_line <= other.start_line && other.end_line <= self.end_line
    }

    /// Depth-first, left-to-right traversal starting at this node.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Child counts of every node in preorder.
    pub fn topology_signature(&self) -> Vec<usize> {
        self.preorder().map(|node| node.children.len()).collect()
    }

    /// Nested-parenthesis encoding of the subtree shape; a leaf is `"()"`.
    pub fn shape_signature(&self) -> String {
        let mut out = String::new();
        self.write_shape(&mut out);
        out
    }

    fn write_shape(&self, out: &mut String) {
        out.push('(');
        for child in &self.children {
            child.write_shape(out);
        }
        out.push(')');
    }

    /// Number of heading levels below this node, counting itself as 0.
    fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Preorder iterator over a subtree.
///
/// Cheap to create; call [`TocNode::preorder`] again to restart.
pub struct Preorder<'a> {
    stack: Vec<&'a TocNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a TocNode;

    fn next(&mut self) -> Option<&'a TocNode> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// One row of a flattened tree: `(level, title, start_line, end_line)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatEntry {
    pub level: usize,
    pub title: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl From<&TocNode> for FlatEntry {
    fn from(node: &TocNode) -> Self {
        Self {
            level: node.level,
            title: node.title.clone(),
            start_line: node.start_line,
            end_line: node.end_line,
        }
    }
}

/// A whole table of contents: the synthetic root and everything below it.
///
/// Serializes as the root node's mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TocTree {
    root: TocNode,
}

impl TocTree {
    pub(crate) fn from_root(root: TocNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &TocNode {
        &self.root
    }

    /// Top-level headings.
    pub fn top_level(&self) -> &[TocNode] {
        &self.root.children
    }

    /// Number of real headings (the root is not counted).
    pub fn len(&self) -> usize {
        self.preorder().count() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Deepest nesting below the root; 0 for an empty tree.
    pub fn max_depth(&self) -> usize {
        self.root.depth()
    }

    /// Preorder traversal including the root.
    pub fn preorder(&self) -> Preorder<'_> {
        self.root.preorder()
    }

    /// Preorder traversal of the real headings only.
    pub fn headings(&self) -> impl Iterator<Item = &TocNode> {
        self.preorder().skip(1)
    }

    /// Headings at a specific level, in document order.
    pub fn headings_at_level(&self, level: usize) -> Vec<&TocNode> {
        self.headings().filter(|node| node.level == level).collect()
    }

    /// Preorder `(level, title, start_line, end_line)` rows, root excluded.
    pub fn flatten(&self) -> Vec<FlatEntry> {
        self.headings().map(FlatEntry::from).collect()
    }

    pub fn topology_signature(&self) -> Vec<usize> {
        self.root.topology_signature()
    }

    pub fn shape_signature(&self) -> String {
        self.root.shape_signature()
    }

    /// Whether two trees have the same branching structure, ignoring content.
    pub fn same_shape(&self, other: &TocTree) -> bool {
        self.topology_signature() == other.topology_signature()
            && self.shape_signature() == other.shape_signature()
    }

    /// Look up a node by its conversation key; `""` addresses the root.
    pub fn find_by_key(&self, key: &str) -> TocResult<Option<&TocNode>> {
        let path = parse_conversation_key(key)?;
        Ok(self.find_by_index(&path))
    }

    /// Look up a node by its index path.
    pub fn find_by_index(&self, path: &[usize]) -> Option<&TocNode> {
        path.iter()
            .try_fold(&self.root, |node, &i| node.children.get(i))
    }

    pub fn to_json_value(&self) -> TocResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to the stored blob format.
    pub fn to_json_string(&self) -> TocResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> TocResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Rebuild a tree from a stored blob. Any missing field is an error.
    pub fn from_json_str(json: &str) -> TocResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Render an index path as a conversation key.
///
/// # Examples
///
/// ```
/// # use nohow::toc::format_conversation_key;
/// assert_eq!(format_conversation_key(&[0, 1, 2]), "0.1.2");
/// assert_eq!(format_conversation_key(&[]), "");
/// ```
pub fn format_conversation_key(index: &[usize]) -> String {
    index
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Parse a conversation key back into an index path.
///
/// # Examples
///
/// ```
/// # use nohow::toc::parse_conversation_key;
/// assert_eq!(parse_conversation_key("0.1").unwrap(), vec![0, 1]);
/// assert!(parse_conversation_key("0..1").is_err());
/// ```
pub fn parse_conversation_key(key: &str) -> TocResult<Vec<usize>> {
    let key = key.trim();
    if key.is_empty() {
        return Ok(Vec::new());
    }
    key.split('.')
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| TocError::InvalidKey(key.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;

    const BOOK: &str = r#"# Part One
## Chapter A
### Section A.1
## Chapter B
# Part Two
## Chapter C"#;

    #[test]
    fn test_conversation_keys() {
        let tree = parse_markdown(BOOK).unwrap();
        let keys: Vec<String> = tree.headings().map(|n| n.conversation_key()).collect();

        assert_eq!(keys, vec!["0", "0.0", "0.0.0", "0.1", "1", "1.0"]);
        assert_eq!(tree.root().conversation_key(), "");
    }

    #[test]
    fn test_find_by_key() {
        let tree = parse_markdown(BOOK).unwrap();

        let node = tree.find_by_key("0.1").unwrap().unwrap();
        assert_eq!(node.title(), "Chapter B");
        assert_eq!(node.index(), &[0, 1]);

        let node = tree.find_by_key("0.0.0").unwrap().unwrap();
        assert_eq!(node.title(), "Section A.1");
        assert_eq!(node.level(), 3);

        assert!(tree.find_by_key("4.2").unwrap().is_none());
        assert!(tree.find_by_key("").unwrap().unwrap().is_root());
        assert!(matches!(
            tree.find_by_key("a.b"),
            Err(TocError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_preorder_is_restartable() {
        let tree = parse_markdown(BOOK).unwrap();
        let first: Vec<&str> = tree.preorder().map(|n| n.title()).collect();
        let second: Vec<&str> = tree.preorder().map(|n| n.title()).collect();

        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                "ROOT",
                "Part One",
                "Chapter A",
                "Section A.1",
                "Chapter B",
                "Part Two",
                "Chapter C"
            ]
        );
    }

    #[test]
    fn test_keys_are_preorder_ordinals() {
        let tree = parse_markdown(BOOK).unwrap();
        let keys: Vec<usize> = tree.preorder().map(|n| n.key()).collect();
        assert_eq!(keys, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_signatures() {
        let tree = parse_markdown(BOOK).unwrap();

        assert_eq!(tree.topology_signature(), vec![2, 2, 1, 0, 0, 1, 0]);
        assert_eq!(tree.shape_signature(), "(((())())(()))");
    }

    #[test]
    fn test_empty_tree_signatures() {
        let tree = parse_markdown("no headings here\njust prose").unwrap();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.topology_signature(), vec![0]);
        assert_eq!(tree.shape_signature(), "()");
        assert_eq!(tree.root().start_line(), 0);
        assert_eq!(tree.root().end_line(), 0);
    }

    #[test]
    fn test_same_shape_different_content() {
        let a = parse_markdown("# A\n## B\n## C").unwrap();
        let b = parse_markdown("text\n\n# X\n\n### Y\n\n### Z\n").unwrap();
        let c = parse_markdown("# A\n## B\n### C").unwrap();

        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
        assert_ne!(a.shape_signature(), c.shape_signature());
    }

    #[test]
    fn test_json_field_names() {
        let tree = parse_markdown("# Only").unwrap();
        let value = tree.to_json_value().unwrap();

        assert_eq!(value["key"], 0);
        assert_eq!(value["level"], 0);
        assert_eq!(value["title"], "ROOT");
        assert_eq!(value["index"], serde_json::json!([]));
        let child = &value["children"][0];
        assert_eq!(child["title"], "Only");
        assert_eq!(child["index"], serde_json::json!([0]));
        assert_eq!(child["start_line"], 1);
        assert_eq!(child["end_line"], 1);
        assert_eq!(child["children"], serde_json::json!([]));
    }

    #[test]
    fn test_json_round_trip() {
        let tree = parse_markdown(BOOK).unwrap();
        let blob = tree.to_json_string().unwrap();
        let restored = TocTree::from_json_str(&blob).unwrap();

        assert_eq!(restored, tree);
        assert_eq!(restored.topology_signature(), tree.topology_signature());
        assert_eq!(restored.shape_signature(), tree.shape_signature());
    }

    #[test]
    fn test_json_missing_field_fails() {
        let blob = r#"{
            "key": 0, "level": 0, "index": [], "title": "ROOT",
            "start_line": 1, "end_line": 2,
            "children": [
                {"key": 1, "level": 1, "index": [0], "title": "A",
                 "start_line": 1, "children": []}
            ]
        }"#;

        let err = TocTree::from_json_str(blob).unwrap_err();
        assert!(matches!(err, TocError::Json(_)));
        assert!(err.to_string().contains("end_line"));
    }

    #[test]
    fn test_headings_at_level_and_depth() {
        let tree = parse_markdown(BOOK).unwrap();

        let chapters: Vec<&str> = tree
            .headings_at_level(2)
            .into_iter()
            .map(|n| n.title())
            .collect();
        assert_eq!(chapters, vec!["Chapter A", "Chapter B", "Chapter C"]);
        assert_eq!(tree.max_depth(), 3);
        assert_eq!(tree.len(), 6);
    }
}
