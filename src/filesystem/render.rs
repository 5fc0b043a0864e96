use crate::ext::TimestampExt;
use crate::filesystem::{Node, NodeId, Tree};

const BRANCH: &str = "├── ";
const CORNER: &str = "└── ";
const BAR: &str = "│   ";
const BLANK: &str = "    ";

/// Draws the subtree below `dir` with box-drawing connectors, one line per
/// node, children in insertion order. The directory itself is not drawn.
pub fn render_children(tree: &Tree, dir: NodeId) -> String {
    let mut out = String::new();
    render_level(tree, dir, "", &mut out);
    out.truncate(out.trim_end_matches('\n').len());
    out
}

fn render_level(tree: &Tree, dir: NodeId, prefix: &str, out: &mut String) {
    let children = tree.children(dir).collect::<Vec<_>>();
    let count = children.len();

    for (index, (id, node)) in children.into_iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { CORNER } else { BRANCH };

        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&label(node));
        out.push('\n');

        if node.is_directory() {
            let nested = format!("{prefix}{}", if is_last { BLANK } else { BAR });
            render_level(tree, id, &nested, out);
        }
    }
}

fn label(node: &Node) -> String {
    if node.is_directory() {
        format!("{}/", node.name())
    } else {
        format!(
            "{} [{} | {}]",
            node.name(),
            node.format_size(),
            node.created_at().clock_stamp()
        )
    }
}
