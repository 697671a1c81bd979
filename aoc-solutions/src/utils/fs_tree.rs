//! Filesystem tree rebuilt from a terminal transcript
//!
//! Nodes live in an arena owned by [`FsTree`] and refer to each other by
//! [`NodeId`]. The "current directory" is a cursor held by [`TreeBuilder`];
//! absolute-path lookup goes through an explicit [`PathIndex`].

use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("cannot ascend above the root directory")]
    AscendPastRoot,
    #[error("no directory named `{0}` in the current directory")]
    UnknownDirectory(String),
    #[error("`{0}` is a file, not a directory")]
    NotADirectory(String),
    #[error("`{0}` is already registered with a different kind")]
    KindConflict(String),
    #[error("adding `{name}` ({size} bytes) overflows the total size")]
    SizeOverflow { name: String, size: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File { size: u64 },
}

#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }
}

/// Append-only tree of directories and files rooted at `/`
///
/// The sum of all file sizes is kept within `u64`, so no directory size
/// can overflow.
#[derive(Debug, Clone)]
pub struct FsTree {
    nodes: Vec<Node>,
    total_file_size: u64,
}

impl Default for FsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FsTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: "/".to_string(),
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Directory,
            }],
            total_file_size: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes, the root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Direct child of `parent` with the given name
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&id| self.node(id).name == name)
    }

    /// Add `name` under `parent`. Re-adding an existing name with the same
    /// kind returns the existing node. A file that would push the total size
    /// past `u64::MAX` is rejected.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: &str,
        kind: NodeKind,
    ) -> Result<NodeId, TreeError> {
        if let Some(existing) = self.child(parent, name) {
            return match (self.node(existing).kind, kind) {
                (NodeKind::Directory, NodeKind::Directory) => Ok(existing),
                (NodeKind::File { size: a }, NodeKind::File { size: b }) if a == b => Ok(existing),
                _ => Err(TreeError::KindConflict(name.to_string())),
            };
        }

        if let NodeKind::File { size } = kind {
            self.total_file_size = self.total_file_size.checked_add(size).ok_or_else(|| {
                TreeError::SizeOverflow {
                    name: name.to_string(),
                    size,
                }
            })?;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Total size: a file's own size, or the recursive sum over a directory.
    /// Recomputed on every call.
    pub fn size(&self, id: NodeId) -> u64 {
        let node = self.node(id);
        match node.kind {
            NodeKind::File { size } => size,
            NodeKind::Directory => node.children.iter().map(|&child| self.size(child)).sum(),
        }
    }

    /// Directories in pre-order, root first, children in registration order
    pub fn directories(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root()];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(
                self.node(id)
                    .children
                    .iter()
                    .rev()
                    .copied()
                    .filter(|&child| self.node(child).is_dir()),
            );
            Some(id)
        })
    }

    pub fn absolute_path(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            parts.push(self.node(current).name.as_str());
            current = parent;
        }
        parts.reverse();
        format!("/{}", parts.join("/"))
    }

    /// Sum of the sizes of every directory strictly smaller than `threshold`.
    /// Nested directories are counted once per ancestor, so the sum can
    /// exceed the total file size; `None` if it overflows.
    pub fn sum_of_dirs_below(&self, threshold: u64) -> Option<u64> {
        self.directories()
            .map(|id| self.size(id))
            .filter(|&size| size < threshold)
            .try_fold(0u64, u64::checked_add)
    }

    /// Smallest directory of at least `threshold` bytes; the first one in
    /// pre-order wins ties.
    pub fn smallest_dir_at_least(&self, threshold: u64) -> Option<(NodeId, u64)> {
        self.directories()
            .map(|id| (id, self.size(id)))
            .filter(|&(_, size)| size >= threshold)
            .fold(None, |best, (id, size)| match best {
                Some((_, best_size)) if best_size <= size => best,
                _ => Some((id, size)),
            })
    }
}

/// Replays `cd` / listing operations against an [`FsTree`]
#[derive(Debug)]
pub struct TreeBuilder {
    tree: FsTree,
    cursor: NodeId,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        let tree = FsTree::new();
        let cursor = tree.root();
        Self { tree, cursor }
    }

    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    pub fn tree(&self) -> &FsTree {
        &self.tree
    }

    /// `cd /`
    pub fn reset_to_root(&mut self) {
        self.cursor = self.tree.root();
    }

    /// `cd ..`
    pub fn ascend(&mut self) -> Result<(), TreeError> {
        self.cursor = self
            .tree
            .node(self.cursor)
            .parent
            .ok_or(TreeError::AscendPastRoot)?;
        Ok(())
    }

    /// `cd name`; the directory must already have been listed.
    pub fn descend(&mut self, name: &str) -> Result<(), TreeError> {
        let child = self
            .tree
            .child(self.cursor, name)
            .ok_or_else(|| TreeError::UnknownDirectory(name.to_string()))?;
        if !self.tree.node(child).is_dir() {
            return Err(TreeError::NotADirectory(name.to_string()));
        }
        self.cursor = child;
        Ok(())
    }

    /// Record a listing entry under the current directory
    pub fn register_child(&mut self, name: &str, kind: NodeKind) -> Result<NodeId, TreeError> {
        self.tree.add_child(self.cursor, name, kind)
    }

    pub fn finish(self) -> FsTree {
        log::debug!("rebuilt filesystem tree with {} nodes", self.tree.node_count());
        self.tree
    }
}

/// Absolute directory path → node, built once from a finished tree
#[derive(Debug, Default)]
pub struct PathIndex {
    paths: HashMap<String, NodeId>,
}

impl PathIndex {
    pub fn build(tree: &FsTree) -> Self {
        let paths = tree
            .directories()
            .map(|id| (tree.absolute_path(id), id))
            .collect();
        Self { paths }
    }

    pub fn get(&self, path: &str) -> Option<NodeId> {
        self.paths.get(path).copied()
    }

    /// Size of the directory at `path`, or 0 if no such directory was seen
    pub fn size_of(&self, tree: &FsTree, path: &str) -> u64 {
        self.get(path).map_or(0, |id| tree.size(id))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// `/a.txt` (100), `/dir1/b.txt` (50)
    fn small_tree() -> FsTree {
        let mut builder = TreeBuilder::new();
        builder
            .register_child("a.txt", NodeKind::File { size: 100 })
            .unwrap();
        builder.register_child("dir1", NodeKind::Directory).unwrap();
        builder.descend("dir1").unwrap();
        builder
            .register_child("b.txt", NodeKind::File { size: 50 })
            .unwrap();
        builder.finish()
    }

    #[test]
    fn root_size_sums_everything() {
        let tree = small_tree();
        assert_eq!(tree.size(tree.root()), 150);
    }

    #[test]
    fn size_queries_are_repeatable() {
        let tree = small_tree();
        let first = tree.size(tree.root());
        assert_eq!(tree.size(tree.root()), first);
        assert_eq!(tree.size(tree.root()), first);
    }

    #[test]
    fn ascend_at_root_is_an_error() {
        let mut builder = TreeBuilder::new();
        assert_eq!(builder.ascend(), Err(TreeError::AscendPastRoot));
        assert_eq!(builder.cursor(), builder.tree().root());
    }

    #[test]
    fn descend_requires_listed_directory() {
        let mut builder = TreeBuilder::new();
        assert_eq!(
            builder.descend("missing"),
            Err(TreeError::UnknownDirectory("missing".into()))
        );
        builder
            .register_child("f", NodeKind::File { size: 1 })
            .unwrap();
        assert_eq!(
            builder.descend("f"),
            Err(TreeError::NotADirectory("f".into()))
        );
    }

    #[test]
    fn navigation_moves_cursor() {
        let mut builder = TreeBuilder::new();
        builder.register_child("a", NodeKind::Directory).unwrap();
        builder.descend("a").unwrap();
        builder.register_child("b", NodeKind::Directory).unwrap();
        builder.descend("b").unwrap();
        assert_eq!(builder.tree().absolute_path(builder.cursor()), "/a/b");
        builder.ascend().unwrap();
        assert_eq!(builder.tree().absolute_path(builder.cursor()), "/a");
        builder.reset_to_root();
        assert_eq!(builder.tree().absolute_path(builder.cursor()), "/");
    }

    #[test]
    fn relisting_does_not_duplicate() {
        let mut builder = TreeBuilder::new();
        let first = builder
            .register_child("x", NodeKind::File { size: 10 })
            .unwrap();
        let second = builder
            .register_child("x", NodeKind::File { size: 10 })
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(
            builder.register_child("x", NodeKind::Directory),
            Err(TreeError::KindConflict("x".into()))
        );
        let tree = builder.finish();
        assert_eq!(tree.size(tree.root()), 10);
    }

    #[test]
    fn path_index_looks_up_directories() {
        let tree = small_tree();
        let index = PathIndex::build(&tree);
        assert_eq!(index.len(), 2);
        assert_eq!(index.size_of(&tree, "/"), 150);
        assert_eq!(index.size_of(&tree, "/dir1"), 50);
        assert_eq!(index.size_of(&tree, "/nope"), 0);
        assert_eq!(index.get("/a.txt"), None);
    }

    #[test]
    fn aggregate_queries() {
        let tree = small_tree();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.sum_of_dirs_below(100), Some(50));
        assert_eq!(tree.sum_of_dirs_below(1000), Some(200));
        let (id, size) = tree.smallest_dir_at_least(40).unwrap();
        assert_eq!((tree.absolute_path(id), size), ("/dir1".to_string(), 50));
        assert_eq!(tree.smallest_dir_at_least(151), None);
    }

    #[test]
    fn oversized_files_are_rejected() {
        let mut builder = TreeBuilder::new();
        builder
            .register_child("huge", NodeKind::File { size: u64::MAX })
            .unwrap();
        assert_eq!(
            builder.register_child("one", NodeKind::File { size: 1 }),
            Err(TreeError::SizeOverflow {
                name: "one".into(),
                size: 1
            })
        );
        // the same file listed again adds nothing
        builder
            .register_child("huge", NodeKind::File { size: u64::MAX })
            .unwrap();
        let tree = builder.finish();
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.size(tree.root()), u64::MAX);
    }

    #[test]
    fn nested_sums_report_overflow() {
        let mut builder = TreeBuilder::new();
        builder.register_child("a", NodeKind::Directory).unwrap();
        builder.descend("a").unwrap();
        builder
            .register_child("f", NodeKind::File { size: u64::MAX / 2 + 1 })
            .unwrap();
        let tree = builder.finish();
        assert_eq!(tree.sum_of_dirs_below(u64::MAX), None);
        assert_eq!(tree.sum_of_dirs_below(10), Some(0));
    }

    #[test]
    fn ties_resolve_to_first_in_preorder() {
        let mut builder = TreeBuilder::new();
        for name in ["p", "q"] {
            builder.register_child(name, NodeKind::Directory).unwrap();
            builder.descend(name).unwrap();
            builder
                .register_child("f", NodeKind::File { size: 7 })
                .unwrap();
            builder.ascend().unwrap();
        }
        let tree = builder.finish();
        let (id, _) = tree.smallest_dir_at_least(7).unwrap();
        assert_eq!(tree.node(id).name(), "p");
    }

    #[derive(Debug, Clone)]
    enum Op {
        File(u64),
        Dir,
        Up,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1u64..10_000).prop_map(Op::File),
            Just(Op::Dir),
            Just(Op::Up),
        ]
    }

    proptest! {
        #[test]
        fn directory_size_is_sum_of_children(ops in prop::collection::vec(op(), 0..60)) {
            let mut builder = TreeBuilder::new();
            for (i, op) in ops.iter().enumerate() {
                let name = format!("n{i}");
                match op {
                    Op::File(size) => {
                        builder.register_child(&name, NodeKind::File { size: *size }).unwrap();
                    }
                    Op::Dir => {
                        builder.register_child(&name, NodeKind::Directory).unwrap();
                        builder.descend(&name).unwrap();
                    }
                    Op::Up => {
                        let _ = builder.ascend();
                    }
                }
            }
            let tree = builder.finish();

            let file_total: u64 = ops
                .iter()
                .filter_map(|op| match op {
                    Op::File(size) => Some(*size),
                    _ => None,
                })
                .sum();
            prop_assert_eq!(tree.size(tree.root()), file_total);

            for dir in tree.directories() {
                let children: u64 = tree.node(dir).children().iter().map(|&c| tree.size(c)).sum();
                prop_assert_eq!(tree.size(dir), children);
            }
        }
    }
}
