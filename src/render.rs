//! ASCII tree rendering with aligned description comments
//!
//! The renderer works over the collector's flat depth-tagged sequence in
//! two passes: first count the entries at each depth, then render while
//! tracking how many have been consumed per depth. That keeps the whole
//! last-sibling bookkeeping in one array indexed by depth, with no tree
//! structure to rebuild.

use std::collections::BTreeSet;

use crate::store::DescriptionStore;
use crate::walk::Entry;

/// Display column where description comments begin.
const COMMENT_COLUMN: usize = 50;
/// Minimum gap between a name and its comment when the name overruns the
/// comment column.
const MIN_COMMENT_GAP: usize = 2;

/// Placeholder used instead of an empty tree.
pub const EMPTY_TREE_PLACEHOLDER: &str =
    "Project directory is empty or contains no accessible files.";

/// Rendered tree text plus the relative paths still lacking a description.
pub struct RenderedTree {
    pub text: String,
    pub missing: BTreeSet<String>,
}

/// Render the collected sequence as an ASCII tree, merging in stored
/// descriptions as right-aligned `#` comments.
pub fn render(entries: &[Entry], store: &DescriptionStore) -> RenderedTree {
    if entries.is_empty() {
        return RenderedTree {
            text: EMPTY_TREE_PLACEHOLDER.to_string(),
            missing: BTreeSet::new(),
        };
    }

    let max_depth = entries.iter().map(|e| e.depth).max().unwrap_or(0);
    let mut total_at_depth = vec![0usize; max_depth + 1];
    for entry in entries {
        total_at_depth[entry.depth] += 1;
    }

    let mut seen_at_depth = vec![0usize; max_depth + 1];
    let mut last_at_depth = vec![false; max_depth + 1];
    let mut lines = Vec::with_capacity(entries.len());
    let mut missing = BTreeSet::new();

    for entry in entries {
        seen_at_depth[entry.depth] += 1;
        let is_last = seen_at_depth[entry.depth] == total_at_depth[entry.depth];
        last_at_depth[entry.depth] = is_last;

        lines.push(render_line(entry, is_last, &last_at_depth, store));
        if store.lookup(&entry.relative).is_none() {
            missing.insert(entry.relative.clone());
        }
    }

    RenderedTree {
        text: lines.join("\n"),
        missing,
    }
}

/// One output line: glyph prefix, display name, optional comment suffix.
///
/// An entry at depth `d` has `d` prefix columns. Columns `0..d-1` carry a
/// continuation bar unless that ancestor level was last when rendered; the
/// final column is the entry's own corner. Depth-0 entries have no prefix.
fn render_line(
    entry: &Entry,
    is_last: bool,
    last_at_depth: &[bool],
    store: &DescriptionStore,
) -> String {
    let mut line = String::new();
    for level in 0..entry.depth {
        if level == entry.depth - 1 {
            line.push_str(if is_last { "└── " } else { "├── " });
        } else {
            line.push_str(if last_at_depth[level] { "    " } else { "│   " });
        }
    }

    line.push_str(&entry.name);
    if entry.is_dir() {
        line.push('/');
    }

    if let Some(description) = store.lookup(&entry.relative) {
        let width = line.chars().count();
        let padding = COMMENT_COLUMN.saturating_sub(width).max(MIN_COMMENT_GAP);
        line.push_str(&" ".repeat(padding));
        line.push_str("# ");
        line.push_str(description);
    }
    line
}
