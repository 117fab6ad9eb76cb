//! Two-phase hierarchy builder.
//!
//! Scanned headings are first nested into a mutable scratch arena
//! ([`HeadingArena`]), where parent/child links are plain node ids. Once every
//! record has its end line, [`HeadingArena::freeze`] copies the arena into the
//! immutable [`TocTree`], assigning index paths and preorder keys on the way.

use indextree::{Arena, NodeId};
use tracing::debug;

use super::scanner::{Heading, ScannedDocument};
use crate::error::{TocError, TocResult};
use crate::toc::{TocNode, TocTree};

/// Scratch heading record; `end_line` stays `None` until resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRecord {
    pub level: usize,
    pub title: String,
    pub start_line: usize,
    pub end_line: Option<usize>,
}

impl From<Heading> for HeadingRecord {
    fn from(heading: Heading) -> Self {
        Self {
            level: heading.level,
            title: heading.title,
            start_line: heading.line,
            end_line: None,
        }
    }
}

/// Mutable nesting of headings, before end lines and addresses are final.
pub struct HeadingArena {
    arena: Arena<HeadingRecord>,
    /// Top-level headings in document order
    top_level: Vec<NodeId>,
    /// Every heading in document order
    order: Vec<NodeId>,
    line_count: usize,
}

impl HeadingArena {
    /// Nest headings with a level stack: a new heading closes every open
    /// heading at the same or a deeper level, then becomes the last child of
    /// whatever is left on top (or a top-level entry if nothing is).
    pub fn from_scanned(doc: ScannedDocument) -> Self {
        let mut arena = Arena::with_capacity(doc.headings.len());
        let mut top_level = Vec::new();
        let mut order = Vec::with_capacity(doc.headings.len());
        let mut stack: Vec<NodeId> = Vec::new();

        for heading in doc.headings {
            let level = heading.level;
            let id = arena.new_node(HeadingRecord::from(heading));

            while let Some(&top) = stack.last() {
                if arena[top].get().level >= level {
                    stack.pop();
                } else {
                    break;
                }
            }

            match stack.last() {
                Some(&parent) => parent.append(id, &mut arena),
                None => top_level.push(id),
            }

            stack.push(id);
            order.push(id);
        }

        Self {
            arena,
            top_level,
            order,
            line_count: doc.line_count,
        }
    }

    /// Backfill end lines: a section ends on the line before the next heading
    /// at the same or a shallower level, or at the end of the document.
    pub fn resolve_end_lines(&mut self) {
        for (i, &id) in self.order.iter().enumerate() {
            let record = self.arena[id].get();
            let (level, start) = (record.level, record.start_line);

            let end = self.order[i + 1..]
                .iter()
                .map(|&next| self.arena[next].get())
                .find(|next| next.level <= level)
                .map(|next| start.max(next.start_line.saturating_sub(1)))
                .unwrap_or(self.line_count);

            self.arena[id].get_mut().end_line = Some(end);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Copy the arena into an immutable tree under a synthetic root.
    ///
    /// Fails with [`TocError::UnresolvedEndLine`] if
    /// [`resolve_end_lines`](Self::resolve_end_lines) has not run.
    pub fn freeze(&self) -> TocResult<TocTree> {
        let mut next_key = 1;
        let children = self
            .top_level
            .iter()
            .enumerate()
            .map(|(i, &id)| self.freeze_node(id, vec![i], &mut next_key))
            .collect::<TocResult<Vec<_>>>()?;

        Ok(TocTree::from_root(TocNode::root(children)))
    }

    fn freeze_node(
        &self,
        id: NodeId,
        index: Vec<usize>,
        next_key: &mut usize,
    ) -> TocResult<TocNode> {
        let record = self.arena[id].get();
        let end_line = record.end_line.ok_or_else(|| TocError::UnresolvedEndLine {
            title: record.title.clone(),
            start_line: record.start_line,
        })?;

        let key = *next_key;
        *next_key += 1;

        let children = id
            .children(&self.arena)
            .enumerate()
            .map(|(i, child)| {
                let mut child_index = index.clone();
                child_index.push(i);
                self.freeze_node(child, child_index, next_key)
            })
            .collect::<TocResult<Vec<_>>>()?;

        Ok(TocNode::new(
            key,
            record.level,
            index,
            record.title.clone(),
            (record.start_line, end_line),
            children,
        ))
    }
}

/// Nest, resolve and freeze scanned headings in one go.
pub fn build_tree(doc: ScannedDocument) -> TocResult<TocTree> {
    let line_count = doc.line_count;
    let mut arena = HeadingArena::from_scanned(doc);
    arena.resolve_end_lines();
    let tree = arena.freeze()?;

    debug!(
        headings = arena.len(),
        top_level = tree.top_level().len(),
        lines = line_count,
        "built toc tree"
    );
    Ok(tree)
}
