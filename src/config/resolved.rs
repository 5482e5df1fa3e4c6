use serde::{Deserialize, Serialize};

/// Number of spaces the assignment and `goto` are indented past the
/// captured indentation.
pub const INDENT_STEP: &str = "    ";

/// Lines eligible for rewriting: `start` is included, `end` is excluded.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RewriteWindow {
    pub start: usize,
    pub end: usize,
}

impl RewriteWindow {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    pub window: RewriteWindow,
    pub result_var: String,
    pub cleanup_label: String,
    pub ctor_prefix: String,
}
