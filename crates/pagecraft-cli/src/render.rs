//! Block tree as ASCII lines.

use pagecraft_tree::{Block, BlockTree};

/// Props shown as a one-line summary, first present wins.
const SUMMARY_PROPS: [&str; 4] = ["text", "label", "title", "src"];

/// Format a tree as ASCII lines. `max_depth` 0 shows only root blocks.
pub fn format_tree(tree: &BlockTree, max_depth: Option<usize>) -> Vec<String> {
    let mut lines = Vec::new();
    for block in tree.blocks() {
        format_node(block, 0, "", true, max_depth, &mut lines);
    }
    lines
}

fn format_node(
    block: &Block,
    depth: usize,
    prefix: &str,
    is_last: bool,
    max_depth: Option<usize>,
    lines: &mut Vec<String>,
) {
    if max_depth.is_some_and(|max| depth > max) {
        return;
    }

    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└─ "
    } else {
        "├─ "
    };

    let mut line = format!("{}{}{} [{}]", prefix, connector, block.id, block.kind);
    if !block.allow_nesting && !block.is_leaf() {
        line.push_str(" (locked)");
    }
    if let Some(summary) = summary(block) {
        line.push(' ');
        line.push_str(&summary);
    }

    let hidden = max_depth.is_some_and(|max| depth == max) && !block.is_leaf();
    if hidden {
        line.push_str(&format!(" … {} more", block.descendant_count()));
    }
    lines.push(line);
    if hidden {
        return;
    }

    let child_prefix = if depth == 0 {
        String::new()
    } else if is_last {
        format!("{}   ", prefix)
    } else {
        format!("{}│  ", prefix)
    };

    let count = block.blocks.len();
    for (i, child) in block.blocks.iter().enumerate() {
        format_node(child, depth + 1, &child_prefix, i + 1 == count, max_depth, lines);
    }
}

fn summary(block: &Block) -> Option<String> {
    SUMMARY_PROPS
        .iter()
        .find_map(|key| block.prop(key).and_then(|v| v.as_str()))
        .map(|text| format!("{:?}", truncate(text, 40)))
}

/// Truncate on a char boundary, marking the cut with `…`.
fn truncate(text: &str, max_chars: usize) -> String {
    let mut lines = text.lines();
    let first_line = lines.next().unwrap_or("");
    let more_lines = lines.any(|line| !line.trim().is_empty());
    if first_line.chars().count() <= max_chars && !more_lines {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(max_chars).collect();
    format!("{}…", cut)
}
