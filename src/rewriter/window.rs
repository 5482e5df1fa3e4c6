use crate::config::resolved::RewriteWindow;

/// Where a pass currently sits relative to the rewrite window.
///
/// Moves forward only: `BeforeWindow -> InWindow -> AfterWindow`. The window
/// opens on the line equal to `start` and closes on the first line that is
/// `>= end`, so the start line is included and the end line is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    BeforeWindow,
    InWindow,
    AfterWindow,
}

impl WindowState {
    /// Returns the state for `line`, given the state after the previous line.
    pub fn advance(self, line: usize, window: RewriteWindow) -> WindowState {
        let mut state = self;
        if state == WindowState::BeforeWindow && line == window.start {
            state = WindowState::InWindow;
        }
        if state == WindowState::InWindow && line >= window.end {
            state = WindowState::AfterWindow;
        }
        state
    }

    pub fn is_open(self) -> bool {
        self == WindowState::InWindow
    }
}

/// Tracks the window over one pass of increasing line numbers.
#[derive(Debug, Clone, Copy)]
pub struct RegionSelector {
    window: RewriteWindow,
    state: WindowState,
}

impl RegionSelector {
    pub fn new(window: RewriteWindow) -> Self {
        Self { window, state: WindowState::default() }
    }

    /// Call once per line, in order.
    pub fn in_window(&mut self, line: usize) -> bool {
        self.state = self.state.advance(line, self.window);
        self.state.is_open()
    }

    pub fn state(&self) -> WindowState {
        self.state
    }
}
