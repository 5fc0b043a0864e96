use std::collections::HashMap;

use snafu::OptionExt;

use crate::filesystem::error::NotFoundSnafu;
use crate::filesystem::{FsError, Node, NodeId};

/// Arena holding every node of one simulated filesystem.
///
/// Nodes refer to their parent by [`NodeId`] only; ownership flows strictly
/// downward through the directories' children maps. Unlinking a child from
/// its directory therefore releases the whole subtree from the arena.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: usize,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates a tree holding only an empty, unnamed root directory.
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::directory(""));
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, FsError> {
        self.nodes
            .get_mut(&id)
            .context(NotFoundSnafu { name: id.to_string() })
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    pub fn get_child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.node(dir).and_then(|node| node.get_child(name))
    }

    pub fn has_child(&self, dir: NodeId, name: &str) -> bool {
        self.get_child(dir, name).is_some()
    }

    /// Children of `dir` in insertion order. Empty for files.
    pub fn children(&self, dir: NodeId) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.node(dir)
            .and_then(Node::children)
            .into_iter()
            .flat_map(|children| children.values())
            .filter_map(|id| self.node(*id).map(|node| (*id, node)))
    }

    /// Number of parent hops from `id` up to the root.
    pub fn depth(&self, id: NodeId) -> usize {
        std::iter::successors(self.parent(id), |current| self.parent(*current)).count()
    }

    /// Absolute `/`-separated path of `id`; the root is `/`.
    pub fn path(&self, id: NodeId) -> String {
        let mut segments = std::iter::successors(Some(id), |current| self.parent(*current))
            .filter_map(|current| self.node(current))
            .filter(|node| node.parent().is_some())
            .map(Node::name)
            .collect::<Vec<_>>();
        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    /// Links `node` into the directory `dir` and returns its new handle.
    pub fn add_child(&mut self, dir: NodeId, mut node: Node) -> Result<NodeId, FsError> {
        let id = NodeId(self.next_id);
        self.node_mut(dir)?.add_child(&node.name, id)?;

        node.parent = Some(dir);
        self.nodes.insert(id, node);
        self.next_id += 1;
        Ok(id)
    }

    /// Unlinks the child `name` of `dir` and drops it together with all of
    /// its descendants. Returns how many nodes were released.
    pub fn remove_child(&mut self, dir: NodeId, name: &str) -> Result<usize, FsError> {
        let id = self.node_mut(dir)?.remove_child(name)?;
        Ok(self.release(id))
    }

    /// Re-keys the child `old` of `dir` as `new`. The node keeps its handle,
    /// children and timestamps, and moves to the end of the listing order.
    pub fn rename_child(&mut self, dir: NodeId, old: &str, new: &str) -> Result<NodeId, FsError> {
        let parent = self.node_mut(dir)?;
        // Checked before unlinking `old` so a taken name leaves the directory intact
        if parent.has_child(new) {
            return Err(FsError::AlreadyExists {
                name: new.to_string(),
            });
        }
        let id = parent.remove_child(old)?;
        parent.add_child(new, id)?;
        self.node_mut(id)?.set_name(new);
        Ok(id)
    }

    fn release(&mut self, id: NodeId) -> usize {
        let mut pending = vec![id];
        let mut released = 0;
        while let Some(current) = pending.pop() {
            let Some(node) = self.nodes.remove(&current) else {
                continue;
            };
            released += 1;
            if let Some(children) = node.children() {
                pending.extend(children.values().copied());
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.root();
        let docs = tree.add_child(root, Node::directory("Documents")).unwrap();
        let college = tree.add_child(docs, Node::directory("College")).unwrap();
        let pdf = tree
            .add_child(college, Node::file("assignment.pdf", 2048))
            .unwrap();
        (tree, docs, college, pdf)
    }

    #[test]
    fn root_is_an_empty_unnamed_directory() {
        let tree = Tree::new();
        let root = tree.node(tree.root()).unwrap();
        assert_eq!(root.name(), "");
        assert!(root.is_directory());
        assert!(root.is_empty());
        assert_eq!(tree.path(tree.root()), "/");
        assert_eq!(tree.depth(tree.root()), 0);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn paths_and_depths_follow_parent_links() {
        let (tree, docs, college, pdf) = sample();
        assert_eq!(tree.path(docs), "/Documents");
        assert_eq!(tree.path(college), "/Documents/College");
        assert_eq!(tree.path(pdf), "/Documents/College/assignment.pdf");
        assert_eq!(tree.depth(docs), 1);
        assert_eq!(tree.depth(college), 2);
        assert_eq!(tree.depth(pdf), 3);
    }

    #[test]
    fn add_child_sets_parent_back_reference() {
        let (tree, docs, college, pdf) = sample();
        assert_eq!(tree.parent(docs), Some(tree.root()));
        assert_eq!(tree.parent(college), Some(docs));
        assert_eq!(tree.parent(pdf), Some(college));
        assert_eq!(tree.get_child(college, "assignment.pdf"), Some(pdf));
    }

    #[test]
    fn add_child_into_file_fails() {
        let (mut tree, _, _, pdf) = sample();
        let result = tree.add_child(pdf, Node::file("inner.txt", 1));
        assert!(matches!(result, Err(FsError::NotADirectory { .. })));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = Tree::new();
        let root = tree.root();
        for name in ["zeta", "alpha", "mid"] {
            tree.add_child(root, Node::file(name, 1)).unwrap();
        }
        let names = tree
            .children(root)
            .map(|(_, node)| node.name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn remove_child_releases_whole_subtree() {
        let (mut tree, docs, college, pdf) = sample();
        let released = tree.remove_child(tree.root(), "Documents").unwrap();

        assert_eq!(released, 3);
        assert_eq!(tree.len(), 1);
        assert!(tree.node(docs).is_none());
        assert!(tree.node(college).is_none());
        assert!(tree.node(pdf).is_none());
        assert!(!tree.has_child(tree.root(), "Documents"));
    }

    #[test]
    fn remove_missing_child_fails() {
        let (mut tree, docs, _, _) = sample();
        assert_eq!(
            tree.remove_child(docs, "nope"),
            Err(FsError::NotFound {
                name: "nope".into()
            })
        );
    }

    #[test]
    fn rename_child_keeps_identity_and_subtree() {
        let (mut tree, docs, college, pdf) = sample();
        let renamed = tree.rename_child(docs, "College", "University").unwrap();

        assert_eq!(renamed, college);
        assert_eq!(tree.get_child(docs, "College"), None);
        assert_eq!(tree.get_child(docs, "University"), Some(college));
        assert_eq!(tree.path(pdf), "/Documents/University/assignment.pdf");
    }

    #[test]
    fn rename_child_onto_existing_sibling_fails_without_changes() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.add_child(root, Node::file("a.txt", 1)).unwrap();
        tree.add_child(root, Node::file("b.txt", 1)).unwrap();

        assert!(matches!(
            tree.rename_child(root, "a.txt", "b.txt"),
            Err(FsError::AlreadyExists { .. })
        ));
        assert_eq!(tree.get_child(root, "a.txt"), Some(a));
        let names = tree
            .children(root)
            .map(|(_, node)| node.name())
            .collect::<Vec<_>>();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn handles_are_not_reused_after_delete() {
        let mut tree = Tree::new();
        let root = tree.root();
        let first = tree.add_child(root, Node::file("a", 1)).unwrap();
        tree.remove_child(root, "a").unwrap();
        let second = tree.add_child(root, Node::file("a", 1)).unwrap();
        assert_ne!(first, second);
    }
}
