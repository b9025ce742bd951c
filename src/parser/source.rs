//! Typed, validated view of a pdftohtml XML dump.

use serde::Serialize;

use crate::model::{FontTable, LayoutConfig, Metadata, TextRun};

/// Everything read from the source, before any filtering or merging.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceDocument {
    /// Title and author
    pub metadata: Metadata,

    /// Effective thresholds (source `<config>` plus overrides)
    pub config: LayoutConfig,

    /// Whether the source carried a `<config>` block
    pub has_config: bool,

    /// Fonts with roles assigned
    pub fonts: FontTable,

    /// Pages in source order
    pub pages: Vec<SourcePage>,
}

impl SourceDocument {
    /// Total number of runs across pages.
    pub fn run_count(&self) -> usize {
        self.pages.iter().map(|p| p.runs.len()).sum()
    }
}

/// One `<page>` element and its runs in source order.
#[derive(Debug, Clone, Serialize)]
pub struct SourcePage {
    /// Page number
    pub number: u32,

    /// Page height
    pub height: i64,

    /// Page width
    pub width: i64,

    /// Every `<text>` element of the page, unfiltered
    pub runs: Vec<TextRun>,
}

impl SourcePage {
    /// Create an empty source page.
    pub fn new(number: u32, height: i64, width: i64) -> Self {
        Self {
            number,
            height,
            width,
            runs: Vec::new(),
        }
    }
}
