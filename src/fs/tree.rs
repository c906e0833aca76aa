use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Index of a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Whether a node is a plain entry or a directory that can be expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory {
        expanded: bool,
        children: Vec<NodeId>,
    },
}

/// A single filesystem entry in the tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    pub depth: usize,
    /// Non-owning link used for ancestry queries only. `None` for the root.
    pub parent: Option<NodeId>,
}

impl TreeNode {
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Always `false` for files.
    pub fn is_expanded(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { expanded: true, .. })
    }

    /// Loaded children in enumeration order. Empty for files and for
    /// directories that were never loaded.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children, .. } => children,
            NodeKind::File => &[],
        }
    }
}

/// Lazily loaded directory hierarchy.
///
/// Nodes are stored in an arena; parents own their children through the
/// `children` id list and children point back through `parent`. Nodes are
/// never removed.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

/// A directory entry as read from disk, before it becomes a node.
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

impl Tree {
    pub const ROOT: NodeId = NodeId(0);

    /// Build a tree rooted at `root_path`, eagerly loading and expanding
    /// every directory whose depth is below `initial_depth`.
    ///
    /// Directories at exactly `initial_depth` are created collapsed and
    /// unloaded. Unreadable directories simply end up childless.
    pub fn build(root_path: &Path, initial_depth: usize) -> Self {
        let root = TreeNode {
            name: display_name(root_path),
            path: root_path.to_path_buf(),
            kind: NodeKind::Directory {
                expanded: true,
                children: Vec::new(),
            },
            depth: 0,
            parent: None,
        };
        let mut tree = Self { nodes: vec![root] };

        let mut pending = vec![Self::ROOT];
        while let Some(id) = pending.pop() {
            if tree.get(id).depth >= initial_depth {
                continue;
            }
            for child in tree.load_children(id) {
                if tree.get(child).is_dir() && tree.get(child).depth < initial_depth {
                    tree.set_expanded(child, true);
                    pending.push(child);
                }
            }
        }

        debug!(
            root = %root_path.display(),
            initial_depth,
            nodes = tree.len(),
            "built tree"
        );
        tree
    }

    #[cfg(test)]
    pub fn root(&self) -> &TreeNode {
        self.get(Self::ROOT)
    }

    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Total number of nodes loaded so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Enumerate the directory behind `id` and append one child per entry.
    ///
    /// This does not guard against repeated loads: every call appends a
    /// fresh enumeration. Callers check that the children are empty first.
    /// A read failure (or a file node) leaves the children unchanged.
    /// Returns the ids of the newly appended children.
    pub fn load_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let (path, depth) = {
            let node = self.get(id);
            if !node.is_dir() {
                return Vec::new();
            }
            (node.path.clone(), node.depth)
        };

        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "treating unreadable directory as empty");
                return Vec::new();
            }
        };

        let mut added = Vec::with_capacity(entries.len());
        for entry in entries {
            let child = NodeId(self.nodes.len());
            let kind = if entry.is_dir {
                NodeKind::Directory {
                    expanded: false,
                    children: Vec::new(),
                }
            } else {
                NodeKind::File
            };
            self.nodes.push(TreeNode {
                name: entry.name,
                path: entry.path,
                kind,
                depth: depth + 1,
                parent: Some(id),
            });
            added.push(child);
        }

        if let NodeKind::Directory { children, .. } = &mut self.nodes[id.0].kind {
            children.extend_from_slice(&added);
        }
        added
    }

    /// Flip a directory between expanded and collapsed, loading its children
    /// the first time it is expanded. Already loaded children are kept as is.
    /// Files are left untouched.
    pub fn toggle(&mut self, id: NodeId) {
        let node = self.get(id);
        if !node.is_dir() {
            return;
        }
        let expand = !node.is_expanded();
        let needs_load = expand && node.children().is_empty();

        self.set_expanded(id, expand);
        if needs_load {
            let loaded = self.load_children(id);
            debug!(path = %self.get(id).path.display(), count = loaded.len(), "lazy-loaded directory");
        }
    }

    /// True for the root and for the positionally last child of a parent.
    pub fn is_last_child(&self, id: NodeId) -> bool {
        let Some(parent) = self.get(id).parent else {
            return true;
        };
        match self.get(parent).children().last() {
            Some(last) => *last == id,
            None => true,
        }
    }

    /// Pre-order list of visible nodes, descending only into expanded
    /// directories. Must be recomputed after any expand, collapse or load.
    pub fn flatten(&self) -> Vec<NodeId> {
        let mut visible = Vec::new();
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            visible.push(id);
            let node = self.get(id);
            if node.is_expanded() {
                stack.extend(node.children().iter().rev().copied());
            }
        }
        visible
    }

    fn set_expanded(&mut self, id: NodeId, value: bool) {
        if let NodeKind::Directory { expanded, .. } = &mut self.nodes[id.0].kind {
            *expanded = value;
        }
    }
}

/// Read a directory's entries sorted by file name. Entries that fail to
/// enumerate are skipped; symlinks are not followed.
fn read_entries(path: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push((entry.file_name(), entry.path(), is_dir));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(entries
        .into_iter()
        .map(|(name, path, is_dir)| Entry {
            name: name.to_string_lossy().into_owned(),
            path,
            is_dir,
        })
        .collect())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    /// root/{a.txt, b.txt, sub/c.txt}
    fn setup_simple() -> TempDir {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("a.txt")).unwrap();
        File::create(dir.path().join("b.txt")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("c.txt")).unwrap();
        dir
    }

    /// root/l1/l2/l3/l4/leaf.txt
    fn setup_nested() -> TempDir {
        let dir = TempDir::new().unwrap();
        let deep = dir.path().join("l1").join("l2").join("l3").join("l4");
        fs::create_dir_all(&deep).unwrap();
        File::create(deep.join("leaf.txt")).unwrap();
        dir
    }

    fn names(tree: &Tree, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|id| tree.get(*id).name.clone()).collect()
    }

    fn find(tree: &Tree, name: &str) -> NodeId {
        (0..tree.len())
            .map(NodeId)
            .find(|id| tree.get(*id).name == name)
            .unwrap()
    }

    #[test]
    fn root_is_expanded_directory_at_depth_zero() {
        let dir = setup_simple();
        let tree = Tree::build(dir.path(), 1);
        let root = tree.root();
        assert!(root.is_dir());
        assert!(root.is_expanded());
        assert_eq!(root.depth, 0);
        assert!(root.parent.is_none());
        assert_eq!(root.path, dir.path());
    }

    #[test]
    fn depths_increase_by_one_from_parent() {
        let dir = setup_nested();
        let tree = Tree::build(dir.path(), 10);
        for i in 0..tree.len() {
            let node = tree.get(NodeId(i));
            if let Some(parent) = node.parent {
                assert_eq!(node.depth, tree.get(parent).depth + 1);
            }
        }
    }

    #[test]
    fn depth_zero_yields_childless_root() {
        let dir = setup_simple();
        let tree = Tree::build(dir.path(), 0);
        assert!(tree.root().children().is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn initial_depth_bounds_eager_expansion() {
        let dir = setup_nested();
        let tree = Tree::build(dir.path(), 2);

        let l1 = tree.get(find(&tree, "l1"));
        assert_eq!(l1.depth, 1);
        assert!(l1.is_expanded());
        assert_eq!(l1.children().len(), 1);

        let l2 = tree.get(find(&tree, "l2"));
        assert_eq!(l2.depth, 2);
        assert!(!l2.is_expanded());
        assert!(l2.children().is_empty());
        assert!(!(0..tree.len()).any(|i| tree.get(NodeId(i)).name == "l3"));
    }

    #[test]
    fn children_are_sorted_by_name() {
        let dir = setup_simple();
        let tree = Tree::build(dir.path(), 1);
        assert_eq!(
            names(&tree, tree.root().children()),
            vec!["a.txt", "b.txt", "sub"]
        );
    }

    #[test]
    fn files_never_report_expanded() {
        let dir = setup_simple();
        let mut tree = Tree::build(dir.path(), 1);
        let a = find(&tree, "a.txt");
        tree.toggle(a);
        assert!(!tree.get(a).is_expanded());
        assert!(tree.get(a).children().is_empty());
    }

    #[test]
    fn missing_root_is_childless_not_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let tree = Tree::build(&missing, 3);
        assert!(tree.root().children().is_empty());
        assert_eq!(tree.root().name, "gone");
    }

    #[test]
    fn load_children_appends_on_every_call() {
        let dir = setup_simple();
        let mut tree = Tree::build(dir.path(), 0);
        tree.load_children(Tree::ROOT);
        assert_eq!(tree.root().children().len(), 3);
        tree.load_children(Tree::ROOT);
        assert_eq!(tree.root().children().len(), 6);
    }

    #[test]
    fn load_children_on_unreadable_dir_is_noop() {
        let dir = setup_simple();
        let mut tree = Tree::build(dir.path(), 1);
        let sub = find(&tree, "sub");
        fs::remove_dir_all(dir.path().join("sub")).unwrap();
        assert!(tree.load_children(sub).is_empty());
        assert!(tree.get(sub).children().is_empty());
    }

    #[test]
    fn is_last_child_only_for_final_sibling() {
        let dir = TempDir::new().unwrap();
        for name in ["A", "B", "C"] {
            File::create(dir.path().join(name)).unwrap();
        }
        let tree = Tree::build(dir.path(), 1);
        assert!(tree.is_last_child(Tree::ROOT));
        assert!(!tree.is_last_child(find(&tree, "A")));
        assert!(!tree.is_last_child(find(&tree, "B")));
        assert!(tree.is_last_child(find(&tree, "C")));
    }

    #[test]
    fn flatten_collapsed_root_is_just_root() {
        let dir = setup_simple();
        let mut tree = Tree::build(dir.path(), 1);
        tree.toggle(Tree::ROOT);
        assert_eq!(tree.flatten(), vec![Tree::ROOT]);
    }

    #[test]
    fn flatten_skips_descendants_of_collapsed_dirs() {
        let dir = setup_nested();
        let mut tree = Tree::build(dir.path(), 4);
        let l2 = find(&tree, "l2");
        tree.toggle(l2);
        assert_eq!(names(&tree, &tree.flatten())[1..], ["l1", "l2"]);
    }

    #[test]
    fn flatten_is_pre_order() {
        let dir = setup_simple();
        let mut tree = Tree::build(dir.path(), 1);
        let root_name = tree.root().name.clone();
        assert_eq!(
            names(&tree, &tree.flatten()),
            vec![root_name.as_str(), "a.txt", "b.txt", "sub"]
        );

        tree.toggle(find(&tree, "sub"));
        assert_eq!(
            names(&tree, &tree.flatten()),
            vec![root_name.as_str(), "a.txt", "b.txt", "sub", "c.txt"]
        );
    }

    #[test]
    fn reexpanding_does_not_reload() {
        let dir = setup_simple();
        let mut tree = Tree::build(dir.path(), 1);
        let sub = find(&tree, "sub");
        tree.toggle(sub);
        let loaded = tree.get(sub).children().to_vec();
        let nodes = tree.len();

        File::create(dir.path().join("sub").join("d.txt")).unwrap();
        tree.toggle(sub);
        assert!(!tree.get(sub).is_expanded());
        tree.toggle(sub);

        assert!(tree.get(sub).is_expanded());
        assert_eq!(tree.get(sub).children(), loaded.as_slice());
        assert_eq!(tree.len(), nodes);
    }
}
