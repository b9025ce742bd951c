//! Text runs and the logical lines they merge into.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::FontSpec;

/// Horizontal gap above which a space is inserted between two runs.
pub const SPACE_GAP: i64 = 5;

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.?!](['"\x{201d}\x{bb}]|&quot;)?\s*$"#).unwrap());

static STARTS_WITH_CAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(['"\x{ab}\x{201c}]|&quot;)?[A-Z]"#).unwrap());

/// A single positioned span of text from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    /// Vertical position
    pub top: i64,
    /// Horizontal position of the left edge
    pub left: i64,
    /// Width of the run
    pub width: i64,
    /// Font of the run
    pub font: Arc<FontSpec>,
    /// Inner markup of the run, verbatim from the source
    pub text: String,
}

impl TextRun {
    /// Create a new text run.
    pub fn new(top: i64, left: i64, width: i64, font: Arc<FontSpec>, text: impl Into<String>) -> Self {
        Self {
            top,
            left,
            width,
            font,
            text: text.into(),
        }
    }

    /// Right edge of the run.
    pub fn right(&self) -> i64 {
        self.left.saturating_add(self.width)
    }

    /// Check if the run has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Check if the run ends with a sentence terminator.
    pub fn ends_sentence(&self) -> bool {
        SENTENCE_END.is_match(self.text.trim())
    }

    /// Check if the run starts with a capital letter, optionally after an opening quote.
    pub fn begins_sentence(&self) -> bool {
        STARTS_WITH_CAP.is_match(self.text.trim())
    }
}

/// One or more runs sharing (approximately) the same vertical position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalLine {
    /// Vertical position of the first run that created the line
    pub top: i64,
    /// Runs sorted left to right
    pub runs: Vec<TextRun>,
}

impl LogicalLine {
    /// Start a line from its first run.
    pub fn new(run: TextRun) -> Self {
        Self {
            top: run.top,
            runs: vec![run],
        }
    }

    /// Merge another run into the line, keeping runs ordered by `left`.
    ///
    /// Blank runs are ignored.
    pub fn add_run(&mut self, run: TextRun) {
        if run.is_blank() {
            return;
        }
        self.runs.push(run);
        self.runs.sort_by_key(|r| r.left);
    }

    /// Left edge of the leftmost run.
    pub fn left(&self) -> i64 {
        self.runs.first().map_or(0, |r| r.left)
    }

    /// Sum of the run widths.
    pub fn width(&self) -> i64 {
        self.runs.iter().fold(0i64, |acc, r| acc.saturating_add(r.width))
    }

    /// Concatenated run text with no inserted spacing.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the line was assembled from more than one run.
    pub fn is_composite(&self) -> bool {
        self.runs.len() > 1
    }

    /// Check if the last run ends a sentence.
    pub fn ends_sentence(&self) -> bool {
        self.runs.last().is_some_and(TextRun::ends_sentence)
    }

    /// Check if the first run begins a sentence.
    pub fn begins_sentence(&self) -> bool {
        self.runs.first().is_some_and(TextRun::begins_sentence)
    }

    /// Iterate runs paired with whether a space separates them from the previous run.
    pub fn spaced_runs(&self) -> impl Iterator<Item = (bool, &TextRun)> {
        self.runs.iter().enumerate().map(move |(i, run)| {
            let spaced = i > 0 && self.runs[i - 1].right().saturating_add(SPACE_GAP) < run.left;
            (spaced, run)
        })
    }
}
