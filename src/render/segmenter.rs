//! Paragraph boundary detection.
//!
//! The segmenter walks lines in document order and decides, for each line,
//! whether a paragraph or section break precedes it. It only looks behind:
//! the previous line's top on the current page, and whether the previous line
//! of the document ended a sentence.

use crate::model::LogicalLine;

use super::BreakStrategy;

/// Leading run of literal spaces that marks a new paragraph.
const SPACE_INDENT: &str = "      ";

/// Marker emitted before a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Break {
    /// Line continues the current paragraph
    #[default]
    None,
    /// Line starts a new paragraph
    Paragraph,
    /// Line starts a new section (a much larger vertical gap)
    Section,
}

impl Break {
    /// Check if any marker is emitted.
    pub fn is_break(&self) -> bool {
        !matches!(self, Break::None)
    }
}

/// Stateful paragraph break detector for one render pass.
#[derive(Debug, Clone)]
pub struct ParagraphSegmenter {
    strategy: BreakStrategy,
    para_break: i64,
    last_top: i64,
    /// `Some(ends_sentence)` of the previous line; carried across pages.
    last_line: Option<bool>,
}

impl ParagraphSegmenter {
    /// Create a segmenter for a strategy and threshold.
    pub fn new(strategy: BreakStrategy, para_break: i64) -> Self {
        Self {
            strategy,
            para_break,
            last_top: 0,
            last_line: None,
        }
    }

    /// Reset per-page state. The previous line is kept.
    pub fn start_page(&mut self) {
        self.last_top = 0;
    }

    /// Decide the marker for the next line and record it as the previous line.
    pub fn next_line(&mut self, line: &LogicalLine) -> Break {
        let decision = match self.strategy {
            BreakStrategy::Vertical => self.vertical(line),
            BreakStrategy::Spaces => {
                if line.text().starts_with(SPACE_INDENT) {
                    Break::Paragraph
                } else {
                    Break::None
                }
            }
            BreakStrategy::Indent => {
                if line.left() > self.para_break {
                    Break::Paragraph
                } else {
                    Break::None
                }
            }
        };

        self.last_top = line.top;
        self.last_line = Some(line.ends_sentence());
        decision
    }

    fn vertical(&self, line: &LogicalLine) -> Break {
        if self.last_top != 0 {
            let diff = line.top.saturating_sub(self.last_top);
            if diff > self.para_break.saturating_mul(2) {
                Break::Section
            } else if diff > self.para_break {
                Break::Paragraph
            } else {
                Break::None
            }
        } else if self.last_line == Some(true) && line.begins_sentence() {
            // Page boundary: no usable gap, fall back to sentence continuity
            Break::Paragraph
        } else {
            Break::None
        }
    }
}
