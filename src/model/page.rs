//! Page-level types.

use std::collections::BTreeMap;

use serde::Serialize;

use super::LogicalLine;

/// A single page of the reconstructed document.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Page number as given by the source
    pub number: u32,

    /// Page height in source units
    pub height: i64,

    /// Page width in source units
    pub width: i64,

    /// Merged lines keyed by their top coordinate
    pub lines: BTreeMap<i64, LogicalLine>,
}

impl Page {
    /// Create an empty page with the given dimensions.
    pub fn new(number: u32, height: i64, width: i64) -> Self {
        Self {
            number,
            height,
            width,
            lines: BTreeMap::new(),
        }
    }

    /// Lines in top-to-bottom order.
    pub fn lines(&self) -> impl Iterator<Item = &LogicalLine> {
        self.lines.values()
    }

    /// Get the line keyed at an exact top coordinate.
    pub fn line_at(&self, top: i64) -> Option<&LogicalLine> {
        self.lines.get(&top)
    }

    /// Number of lines on the page.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the page kept no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (i64, i64) {
        (self.width, self.height)
    }

    /// Plain text of the page, one line per logical line.
    pub fn plain_text(&self) -> String {
        self.lines()
            .map(|line| line.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::new(1, 1263, 892);
        assert_eq!(page.number, 1);
        assert_eq!(page.dimensions(), (892, 1263));
        assert!(page.is_empty());
        assert_eq!(page.plain_text(), "");
    }
}
