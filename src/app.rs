use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::fs::opener::{format_open_error, FileOpener};
use crate::fs::tree::{NodeId, Tree};
use crate::viewport::{Direction, Viewport};

/// Main application state.
pub struct App {
    pub tree: Tree,
    /// Visible nodes in display order; recomputed after every tree change.
    pub flat: Vec<NodeId>,
    pub viewport: Viewport,
    /// Canonical root path, shown in the header.
    pub root_path: PathBuf,
    pub initial_depth: usize,
    /// One-line feedback; empty when there is nothing to report.
    pub status: String,
    pub should_quit: bool,
    opener: Box<dyn FileOpener>,
}

impl App {
    /// Build the tree for `root_path` and start with the cursor on the root.
    pub fn new(root_path: &Path, initial_depth: usize, opener: Box<dyn FileOpener>) -> Self {
        let tree = Tree::build(root_path, initial_depth);
        let flat = tree.flatten();
        let viewport = Viewport::new(flat.len());
        info!(root = %root_path.display(), initial_depth, visible = flat.len(), "session started");
        Self {
            tree,
            flat,
            viewport,
            root_path: root_path.to_path_buf(),
            initial_depth,
            status: String::new(),
            should_quit: false,
            opener,
        }
    }

    /// Node under the cursor.
    pub fn selected(&self) -> Option<NodeId> {
        self.flat.get(self.viewport.cursor()).copied()
    }

    #[cfg(test)]
    pub fn selected_node(&self) -> Option<&crate::fs::tree::TreeNode> {
        self.selected().map(|id| self.tree.get(id))
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(height, width);
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.viewport.step(direction);
    }

    pub fn half_page(&mut self, direction: Direction) {
        self.viewport.half_page(direction);
    }

    pub fn full_page(&mut self, direction: Direction) {
        self.viewport.full_page(direction);
    }

    pub fn press_top_key(&mut self) {
        self.viewport.press_top_key();
    }

    pub fn jump_bottom(&mut self) {
        self.viewport.jump_bottom();
    }

    pub fn clear_pending(&mut self) {
        self.viewport.clear_pending();
    }

    /// Toggle the selected directory, or hand the selected file to the opener.
    pub fn activate_selected(&mut self) {
        let Some(id) = self.selected() else {
            return;
        };
        if self.tree.get(id).is_dir() {
            self.tree.toggle(id);
            self.refresh();
        } else {
            let path = self.tree.get(id).path.clone();
            self.open_file(&path);
        }
    }

    /// Open a file, reporting failure in the status line. A successful open
    /// clears any previous status.
    pub fn open_file(&mut self, path: &Path) {
        match self.opener.open(path) {
            Ok(()) => {
                info!(path = %path.display(), "opened file");
                self.set_status(String::new());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to open file");
                self.set_status(format_open_error(path, &e));
            }
        }
    }

    pub fn set_status(&mut self, status: String) {
        self.status = status;
        self.viewport.sync(self.flat.len(), !self.status.is_empty());
    }

    /// Recompute the flattened sequence and re-clamp the viewport.
    fn refresh(&mut self) {
        self.flat = self.tree.flatten();
        self.viewport.sync(self.flat.len(), !self.status.is_empty());
    }
}
