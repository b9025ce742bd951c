//! Rendering options and configuration.

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::Error;

/// Options for rendering a document to HTML.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// How paragraph breaks are detected
    pub strategy: BreakStrategy,

    /// Page selection
    pub page_selection: PageSelection,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paragraph break strategy.
    pub fn with_strategy(mut self, strategy: BreakStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

/// How paragraph boundaries are detected. Chosen once per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakStrategy {
    /// Vertical gap between consecutive lines exceeds `para_break`
    #[default]
    Vertical,
    /// Line text starts with a run of literal spaces
    Spaces,
    /// Line starts to the right of `para_break`
    Indent,
}

impl BreakStrategy {
    /// Name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakStrategy::Vertical => "vertical",
            BreakStrategy::Spaces => "spaces",
            BreakStrategy::Indent => "indent",
        }
    }
}

impl FromStr for BreakStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(BreakStrategy::Vertical),
            "spaces" => Ok(BreakStrategy::Spaces),
            "indent" => Ok(BreakStrategy::Indent),
            other => Err(Error::Other(format!(
                "unknown paragraph strategy '{}' (expected vertical, spaces or indent)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for BreakStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page selection for rendering.
#[derive(Debug, Clone, Default)]
pub enum PageSelection {
    /// Render all pages
    #[default]
    All,
    /// Render a range of pages (inclusive)
    Range(RangeInclusive<u32>),
    /// Render specific pages
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self, Error> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start = parse_page_number(start)?;
                let end = parse_page_number(end)?;
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start = parse_page_number(start)?;
                let end = parse_page_number(end)?;
                for p in start..=end {
                    if !pages.contains(&p) {
                        pages.push(p);
                    }
                }
            } else {
                let p = parse_page_number(part)?;
                if !pages.contains(&p) {
                    pages.push(p);
                }
            }
        }

        pages.sort();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page_number(s: &str) -> Result<u32, Error> {
    s.trim()
        .parse()
        .map_err(|_| Error::InvalidPageRange(format!("'{}' is not a page number", s.trim())))
}
