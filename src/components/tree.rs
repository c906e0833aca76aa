use std::ops::Range;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::fs::tree::{NodeId, Tree};
use crate::theme::ThemeColors;
use crate::viewport::Viewport;

const PIPE: &str = "│   ";
const BLANK: &str = "    ";
const TEE: &str = "├── ";
const ELBOW: &str = "└── ";

const EXPANDED: &str = "▼ ";
const COLLAPSED: &str = "▶ ";

/// Renders the visible window of the flattened tree, one line per node.
pub struct TreeView<'a> {
    tree: &'a Tree,
    flat: &'a [NodeId],
    viewport: &'a Viewport,
    theme: &'a ThemeColors,
}

impl<'a> TreeView<'a> {
    pub fn new(
        tree: &'a Tree,
        flat: &'a [NodeId],
        viewport: &'a Viewport,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            tree,
            flat,
            viewport,
            theme,
        }
    }

    /// Lines for every node inside the viewport window.
    pub fn lines(&self) -> Vec<Line<'a>> {
        self.range_lines(self.window())
    }

    /// Lines for the viewport window, cut down to `rows` when the area is
    /// shorter than the window. The cursor row is always kept.
    pub fn lines_within(&self, rows: usize) -> Vec<Line<'a>> {
        let window = self.window();
        if window.len() <= rows {
            return self.range_lines(window);
        }
        let cursor = self.viewport.cursor();
        let first = if cursor >= window.start + rows {
            cursor + 1 - rows
        } else {
            window.start
        };
        self.range_lines(first..first + rows)
    }

    fn window(&self) -> Range<usize> {
        let window = self.viewport.window();
        let end = window.end.min(self.flat.len());
        window.start.min(end)..end
    }

    fn range_lines(&self, range: Range<usize>) -> Vec<Line<'a>> {
        range
            .map(|index| self.node_line(index, self.flat[index]))
            .collect()
    }

    fn node_line(&self, index: usize, id: NodeId) -> Line<'a> {
        let node = self.tree.get(id);

        let marker = if index == self.viewport.cursor() {
            Span::styled(
                ">",
                Style::default()
                    .fg(self.theme.cursor_fg)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw(" ")
        };

        let connectors = Span::styled(
            connector_prefix(self.tree, id),
            Style::default().fg(self.theme.connector_fg),
        );

        let name = if node.is_dir() {
            let glyph = if node.is_expanded() {
                EXPANDED
            } else {
                COLLAPSED
            };
            Span::styled(
                format!("{}{}", glyph, node.name),
                Style::default()
                    .fg(self.theme.dir_fg)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(node.name.clone(), Style::default().fg(self.theme.file_fg))
        };

        Line::from(vec![marker, Span::raw(" "), connectors, name])
    }
}

/// Box-drawing prefix for a node: one 4-column segment per ancestor level
/// between the root and the node, then the node's own branch or elbow.
/// The root gets no prefix.
pub fn connector_prefix(tree: &Tree, id: NodeId) -> String {
    let depth = tree.get(id).depth;
    if depth == 0 {
        return String::new();
    }

    // continues[d - 1]: the ancestor at depth d has siblings below it.
    let mut continues = vec![false; depth];
    let mut current = id;
    while let Some(parent) = tree.get(current).parent {
        let level = tree.get(current).depth;
        continues[level - 1] = !tree.is_last_child(current);
        current = parent;
    }

    let mut prefix = String::with_capacity(depth * 4);
    for &more in &continues[..depth - 1] {
        prefix.push_str(if more { PIPE } else { BLANK });
    }
    prefix.push_str(if tree.is_last_child(id) { ELBOW } else { TEE });
    prefix
}
