//! Cursor and scroll state over the flattened tree.

/// Lines taken by the header and the blank line below it.
pub const HEADER_LINES: usize = 2;
/// Lines taken by the controls legend.
pub const CONTROL_LINES: usize = 1;
/// Terminals at or below this height are treated as unconstrained.
pub const MIN_CONSTRAINED_HEIGHT: u16 = 10;

/// Direction of a relative cursor jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn sign(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

/// Cursor position, scroll offset and visible height for a list of `len`
/// entries.
///
/// The viewport never looks at global terminal state: sizes are pushed in
/// through [`Viewport::resize`] and the list length through
/// [`Viewport::sync`].
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    cursor: usize,
    offset: usize,
    height: usize,
    len: usize,
    /// Last `(height, width)` received, if any.
    terminal: Option<(u16, u16)>,
    has_status: bool,
    /// First `g` of a `gg` has been pressed.
    pending_top: bool,
}

impl Viewport {
    pub fn new(len: usize) -> Self {
        let mut viewport = Self::default();
        viewport.sync(len, false);
        viewport
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[cfg(test)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[cfg(test)]
    pub fn is_pending_top(&self) -> bool {
        self.pending_top
    }

    /// Half-open range of entry indices currently on screen.
    ///
    /// When the height covers the whole list nothing is cropped.
    pub fn window(&self) -> std::ops::Range<usize> {
        if self.height >= self.len {
            return 0..self.len;
        }
        let end = (self.offset + self.height).min(self.len);
        self.offset..end
    }

    /// Record a new terminal size and recompute the visible height.
    pub fn resize(&mut self, height: u16, width: u16) {
        self.terminal = Some((height, width));
        self.recompute_height();
        self.scroll_to_cursor();
    }

    /// Adopt a new list length and status-line presence, clamping cursor and
    /// offset back into range.
    pub fn sync(&mut self, len: usize, has_status: bool) {
        self.len = len;
        self.has_status = has_status;
        self.recompute_height();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
        self.scroll_to_cursor();
    }

    pub fn step(&mut self, direction: Direction) {
        self.move_by(direction.sign());
    }

    pub fn half_page(&mut self, direction: Direction) {
        let jump = (self.height / 2).max(1) as isize;
        self.move_by(direction.sign() * jump);
    }

    pub fn full_page(&mut self, direction: Direction) {
        let jump = self.height.max(1) as isize;
        self.move_by(direction.sign() * jump);
    }

    pub fn jump_top(&mut self) {
        self.cursor = 0;
        self.scroll_to_cursor();
    }

    pub fn jump_bottom(&mut self) {
        if self.len > 0 {
            self.cursor = self.len - 1;
            self.scroll_to_cursor();
        }
    }

    /// Handle one press of the `gg` key. The first press only arms the
    /// gesture; the second jumps to the top. Returns true when it jumped.
    pub fn press_top_key(&mut self) -> bool {
        if self.pending_top {
            self.pending_top = false;
            self.jump_top();
            true
        } else {
            self.pending_top = true;
            false
        }
    }

    /// Drop a half-finished `gg` gesture.
    pub fn clear_pending(&mut self) {
        self.pending_top = false;
    }

    fn move_by(&mut self, delta: isize) {
        let last = self.len.saturating_sub(1) as isize;
        let target = (self.cursor as isize + delta).clamp(0, last.max(0));
        self.cursor = target as usize;
        self.scroll_to_cursor();
    }

    fn chrome_lines(&self) -> usize {
        HEADER_LINES + CONTROL_LINES + usize::from(self.has_status)
    }

    fn recompute_height(&mut self) {
        self.height = visible_height(
            self.terminal.map(|(h, _)| h),
            self.chrome_lines(),
            self.len,
        );
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
        let max_offset = self.len.saturating_sub(self.height);
        self.offset = self.offset.min(max_offset);
    }
}

/// Rows available for tree entries.
///
/// Small or unknown terminals fall back to showing every entry.
pub fn visible_height(terminal_height: Option<u16>, chrome: usize, len: usize) -> usize {
    let available = terminal_height.map_or(0, |h| h as isize - chrome as isize);
    let constrained = matches!(terminal_height, Some(h) if h > MIN_CONSTRAINED_HEIGHT);
    let height = if constrained && available > 0 {
        available as usize
    } else {
        available.max(len as isize).max(0) as usize
    };
    height.max(1)
}
