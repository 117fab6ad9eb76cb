//! # nohow
//!
//! Table-of-contents extraction for co-authoring books from markdown.
//!
//! A book's TOC is written as markdown headings. This library scans the ATX
//! headings (ignoring fenced code blocks), nests them by level, works out the
//! range of source lines each heading owns and freezes the result into an
//! immutable, addressable tree. Chapter drafts and conversations are keyed by
//! each node's conversation key, the dotted path of sibling positions.
//!
//! ## Example
//!
//! ```rust
//! use nohow::{parse_markdown, TocTree};
//!
//! let markdown = "# Title\n## A\n### A.1\n## B\n# End\n";
//!
//! let tree = parse_markdown(markdown).unwrap();
//! let a1 = tree.find_by_key("0.0.0").unwrap().unwrap();
//! assert_eq!(a1.title(), "A.1");
//! assert_eq!((a1.start_line(), a1.end_line()), (3, 3));
//!
//! // Store as JSON and load it back
//! let blob = tree.to_json_string().unwrap();
//! let restored = TocTree::from_json_str(&blob).unwrap();
//! assert_eq!(restored.shape_signature(), tree.shape_signature());
//! ```

/// Configuration module for persisting user preferences.
///
/// Provides the heading level window and output defaults.
pub mod config;

/// Error types shared by parsing and tree loading.
pub mod error;

/// Parser module for markdown documents.
///
/// Provides the heading scanner and the hierarchy builder.
pub mod parser;

/// The immutable TOC tree: addressing, traversal, signatures and JSON.
pub mod toc;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{TocError, TocResult};
pub use parser::{
    Document, Heading, TocOptions, extract_toc, extract_toc_with_levels, parse_file,
    parse_markdown,
};
pub use toc::{FlatEntry, TocNode, TocTree};
