use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nohow")]
#[command(version)]
#[command(about = "Extract an addressable table of contents from book markdown")]
#[command(
    long_about = "nohow - Turn a book's markdown table of contents into an addressable heading tree.\n\n\
    Every heading gets a conversation key (its dotted sibling path, e.g. 0.1.2) and the\n\
    range of source lines it owns. Trees can be exported as JSON and loaded back.\n\n\
    Examples:\n  \
    nohow toc.md                  # Show heading tree with keys and line ranges\n  \
    nohow -l toc.md               # Flattened heading list\n  \
    nohow -o json toc.md > t.json # Store the tree\n  \
    nohow --load t.json --tree    # Show a stored tree\n  \
    nohow -s 0.1 toc.md           # Print the lines owned by heading 0.1\n  \
    nohow --max-level 3 --save-levels # Make the level window the default"
)]
pub struct Cli {
    /// Markdown file containing the table of contents, or '-' for stdin
    ///
    /// If no file is given, markdown is read from stdin.
    pub file: Option<PathBuf>,

    /// Load a stored JSON tree instead of parsing markdown
    #[arg(long = "load", value_name = "JSON", conflicts_with = "section")]
    pub load: Option<PathBuf>,

    /// List headings as flattened (level, title, start, end) rows
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Show heading tree structure with box-drawing characters
    #[arg(long = "tree")]
    pub tree: bool,

    /// Print both topology signatures of the tree
    #[arg(long = "signature")]
    pub signature: bool,

    /// Print the source lines owned by the heading at this conversation key
    ///
    /// Example: -s 0.1 prints the second section under the first top-level heading
    #[arg(short = 's', long = "section", value_name = "KEY")]
    pub section: Option<String>,

    /// Output format
    ///
    ///   tree  - Box-drawing tree with keys and line ranges
    ///   plain - One heading per line
    ///   json  - Nested JSON tree (the stored blob format)
    ///
    /// Defaults to the `[output] format` config value.
    #[arg(short = 'o', long = "output")]
    pub output: Option<OutputFormat>,

    /// Shallowest heading level to include (1-6)
    #[arg(long = "min-level", value_name = "LEVEL")]
    pub min_level: Option<usize>,

    /// Deepest heading level to include (1-6)
    #[arg(long = "max-level", value_name = "LEVEL")]
    pub max_level: Option<usize>,

    /// Store the effective --min-level/--max-level window in the config file and exit
    #[arg(long = "save-levels", conflicts_with = "load")]
    pub save_levels: bool,

    /// Hide line ranges in tree output
    #[arg(long = "no-lines")]
    pub no_lines: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Tree,
    Plain,
    Json,
}

impl OutputFormat {
    /// Parse a config-file format name, falling back to `Tree`.
    pub fn from_config(name: &str) -> Self {
        OutputFormat::from_str(name, true).unwrap_or(OutputFormat::Tree)
    }
}
