use crate::error::TocResult;
use crate::toc::{TocNode, TocTree, section};

use super::{TocOptions, extract_toc};

/// Raw TOC markdown together with the tree extracted from it.
///
/// This is the pair a book record keeps: the source text, plus the tree that
/// addresses its sections. The tree is never patched; replacing the content
/// means building a new `Document`.
#[derive(Debug, Clone)]
pub struct Document {
    content: String,
    tree: TocTree,
}

impl Document {
    pub fn new(content: String, options: TocOptions) -> TocResult<Self> {
        let tree = extract_toc(&content, options)?;
        Ok(Self { content, tree })
    }

    /// Pair source text with a tree loaded from a stored blob.
    pub fn from_parts(content: String, tree: TocTree) -> Self {
        Self { content, tree }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tree(&self) -> &TocTree {
        &self.tree
    }

    /// Source lines owned by `node`.
    pub fn section_text(&self, node: &TocNode) -> String {
        section::section_text(&self.content, node)
    }

    /// Source lines owned by the node at conversation `key`, if it exists.
    pub fn extract_section(&self, key: &str) -> TocResult<Option<String>> {
        Ok(self
            .tree
            .find_by_key(key)?
            .map(|node| self.section_text(node)))
    }
}
