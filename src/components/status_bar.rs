use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::theme::ThemeColors;

/// Fixed key legend shown under the tree.
pub const CONTROLS: &str = "Controls: ↑↓/jk navigate, Ctrl+U/D half-page, Ctrl+B/F full-page, gg/G top/bottom, Enter/Space expand/collapse, q quit";

/// Footer lines: a blank separator, the key legend and, when a status message
/// is set, one more line holding it.
pub struct StatusBar<'a> {
    status: &'a str,
    theme: &'a ThemeColors,
}

impl<'a> StatusBar<'a> {
    pub fn new(status: &'a str, theme: &'a ThemeColors) -> Self {
        Self { status, theme }
    }

    pub fn lines(&self) -> Vec<Line<'a>> {
        let legend = Line::from(Span::styled(
            CONTROLS,
            Style::default()
                .fg(self.theme.legend_fg)
                .add_modifier(Modifier::DIM),
        ));

        let mut lines = vec![Line::default(), legend];
        if !self.status.is_empty() {
            lines.push(Line::from(Span::styled(
                self.status,
                Style::default().fg(self.theme.error_fg),
            )));
        }
        lines
    }
}
