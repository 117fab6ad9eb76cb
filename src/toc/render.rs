//! Box-drawing tree output for the CLI.

use unicode_width::UnicodeWidthStr;

use super::{TocNode, TocTree};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

struct Row {
    label: String,
    range: String,
}

impl TocTree {
    /// Render every top-level heading as a box tree.
    ///
    /// Each row reads `<connector><conversation key> <title>`. With
    /// `show_lines`, each row is followed by its `[start-end]` line range,
    /// aligned in one column.
    pub fn render(&self, show_lines: bool) -> String {
        let mut rows = Vec::new();
        let top = self.top_level();
        for (i, node) in top.iter().enumerate() {
            collect_rows(node, "", i == top.len() - 1, &mut rows);
        }

        if !show_lines {
            return rows.iter().map(|row| format!("{}\n", row.label)).collect();
        }

        let width = rows
            .iter()
            .map(|row| row.label.width())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for row in &rows {
            let pad = width - row.label.width();
            out.push_str(&row.label);
            out.push_str(&" ".repeat(pad + 2));
            out.push_str(&row.range);
            out.push('\n');
        }
        out
    }
}

fn collect_rows(node: &TocNode, prefix: &str, is_last: bool, rows: &mut Vec<Row>) {
    let connector = if is_last { LAST_BRANCH } else { BRANCH };
    rows.push(Row {
        label: format!(
            "{}{}{} {}",
            prefix,
            connector,
            node.conversation_key(),
            node.title()
        ),
        range: format!("[{}-{}]", node.start_line(), node.end_line()),
    });

    let child_prefix = format!("{}{}", prefix, if is_last { BLANK } else { PIPE });
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        collect_rows(child, &child_prefix, i == children.len() - 1, rows);
    }
}
