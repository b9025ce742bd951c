//! Layout thresholds that drive line merging and paragraph detection.

use serde::{Deserialize, Serialize};

/// Thresholds read from the `<config>` block of the source document.
///
/// All values are in source coordinate units and stay constant for a run.
/// When the block is absent every number is 0 and no font has a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Runs above this line are treated as page headers and dropped
    pub top_margin: i64,

    /// Runs below this line are treated as page footers and dropped
    pub bottom_margin: i64,

    /// Vertical gap (or left indent, depending on strategy) that starts a paragraph
    pub para_break: i64,

    /// Tolerance within which two runs count as the same line
    pub buf: i64,

    /// Font id of body text
    pub default_font: Option<String>,

    /// Font id of chapter headings
    pub chapter_font: Option<String>,
}

impl LayoutConfig {
    /// Create a config with all thresholds at zero and no font roles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top margin.
    pub fn with_top_margin(mut self, top_margin: i64) -> Self {
        self.top_margin = top_margin;
        self
    }

    /// Set the bottom margin.
    pub fn with_bottom_margin(mut self, bottom_margin: i64) -> Self {
        self.bottom_margin = bottom_margin;
        self
    }

    /// Set the paragraph break threshold.
    pub fn with_para_break(mut self, para_break: i64) -> Self {
        self.para_break = para_break;
        self
    }

    /// Set the same-line tolerance.
    pub fn with_buf(mut self, buf: i64) -> Self {
        self.buf = buf;
        self
    }

    /// Set the body text font id.
    pub fn with_default_font(mut self, id: impl Into<String>) -> Self {
        self.default_font = Some(id.into());
        self
    }

    /// Set the chapter heading font id.
    pub fn with_chapter_font(mut self, id: impl Into<String>) -> Self {
        self.chapter_font = Some(id.into());
        self
    }

    /// Whether a vertical coordinate lies inside the kept band of a page.
    pub fn within_margins(&self, top: i64) -> bool {
        top >= self.top_margin && top <= self.bottom_margin
    }
}
