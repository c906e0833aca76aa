use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::app::App;
use crate::components::status_bar::StatusBar;
use crate::components::tree::TreeView;
use crate::theme::ThemeColors;
use crate::viewport::HEADER_LINES;

/// Name shown at the start of the header.
pub const APP_NAME: &str = "DTree";

/// Render the application UI.
pub fn render(app: &App, theme: &ThemeColors, frame: &mut Frame) {
    frame.render_widget(Screen::new(app, theme), frame.area());
}

/// The whole screen: header, blank line, tree rows, blank line, legend and
/// an optional status line.
///
/// Header and footer are pinned; when the terminal is short the tree rows
/// give way first.
pub struct Screen<'a> {
    app: &'a App,
    theme: &'a ThemeColors,
}

impl<'a> Screen<'a> {
    pub fn new(app: &'a App, theme: &'a ThemeColors) -> Self {
        Self { app, theme }
    }

    fn header_lines(&self) -> Vec<Line<'a>> {
        let header = format!(
            "{} - {} (initial depth: {})",
            APP_NAME,
            self.app.root_path.display(),
            self.app.initial_depth
        );
        vec![
            Line::from(Span::styled(header, Style::default().fg(self.theme.header_fg))),
            Line::default(),
        ]
    }
}

impl Widget for Screen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let footer = StatusBar::new(&self.app.status, self.theme).lines();
        let [header_area, tree_area, footer_area] = Layout::vertical([
            Constraint::Length(HEADER_LINES as u16),
            Constraint::Min(0),
            Constraint::Length(footer.len() as u16),
        ])
        .areas(area);

        let rows = TreeView::new(
            &self.app.tree,
            &self.app.flat,
            &self.app.viewport,
            self.theme,
        )
        .lines_within(tree_area.height as usize);

        Paragraph::new(self.header_lines()).render(header_area, buf);
        Paragraph::new(rows).render(tree_area, buf);
        Paragraph::new(footer).render(footer_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{setup_simple, RecordingOpener};
    use crate::components::status_bar::CONTROLS;
    use crate::theme;
    use std::fs::File;
    use tempfile::TempDir;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn draw(app: &App, width: u16, height: u16) -> Vec<String> {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        Screen::new(app, &tc).render(area, &mut buf);
        (0..height).map(|y| row(&buf, y)).collect()
    }

    /// A flat directory with 100 files, sized like a 120x24 terminal.
    fn long_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        for i in 0..100 {
            File::create(dir.path().join(format!("file{:03}", i))).unwrap();
        }
        let mut app = App::new(dir.path(), 1, Box::new(RecordingOpener::default()));
        app.resize(120, 24);
        (dir, app)
    }

    #[test]
    fn layout_matches_screen_contract() {
        let dir = setup_simple();
        let app = App::new(dir.path(), 1, Box::new(RecordingOpener::default()));
        let rows = draw(&app, 200, 8);

        assert_eq!(
            rows[0],
            format!("DTree - {} (initial depth: 1)", dir.path().display())
        );
        assert_eq!(rows[1], "");
        assert!(rows[2].starts_with("> ▼ "));
        assert_eq!(rows[3], "  ├── a.txt");
        assert_eq!(rows[4], "  ├── b.txt");
        assert_eq!(rows[5], "  └── ▶ sub");
        assert_eq!(rows[6], "");
        assert_eq!(rows[7], CONTROLS);
    }

    #[test]
    fn status_line_is_last() {
        let dir = setup_simple();
        let mut app = App::new(dir.path(), 1, Box::new(RecordingOpener::default()));
        app.open_file(&dir.path().join("nope.txt"));
        let rows = draw(&app, 200, 9);
        assert_eq!(rows[7], CONTROLS);
        assert!(rows[8].starts_with("Error opening nope.txt: "));
    }

    #[test]
    fn footer_stays_visible_with_long_list() {
        let (dir, mut app) = long_app();
        let rows = draw(&app, 120, 24);
        assert!(rows[2].starts_with("> ▼ "));
        assert_eq!(rows[22], "");
        assert_eq!(rows[23], CONTROLS);

        app.open_file(&dir.path().join("missing.txt"));
        let rows = draw(&app, 120, 24);
        assert_eq!(rows[22], CONTROLS);
        assert!(rows[23].starts_with("Error opening missing.txt: "));
    }

    #[test]
    fn cursor_row_survives_footer_with_status() {
        let (dir, mut app) = long_app();
        app.open_file(&dir.path().join("missing.txt"));
        app.jump_bottom();
        let rows = draw(&app, 120, 24);

        assert_eq!(rows[2], "  ├── file081");
        assert_eq!(rows[20], "> └── file099");
        assert_eq!(rows[21], "");
        assert_eq!(rows[22], CONTROLS);
        assert!(rows[23].starts_with("Error opening missing.txt: "));
    }

    #[test]
    fn zero_area_no_panic() {
        let dir = setup_simple();
        let app = App::new(dir.path(), 1, Box::new(RecordingOpener::default()));
        draw(&app, 0, 0);
    }
}
