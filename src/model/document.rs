//! Document-level types.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{FontTable, LayoutConfig, Page};

/// A reconstructed document: fonts, layout thresholds and merged pages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    /// Title and author
    pub metadata: Metadata,

    /// Thresholds used to build the pages
    pub config: LayoutConfig,

    /// Fonts shared by all pages
    pub fonts: FontTable,

    /// Pages keyed by page number
    pub pages: BTreeMap<u32, Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by its number.
    pub fn get_page(&self, number: u32) -> Option<&Page> {
        self.pages.get(&number)
    }

    /// Add a page, replacing any page with the same number.
    pub fn add_page(&mut self, page: Page) {
        self.pages.insert(page.number, page);
    }

    /// Pages in ascending page-number order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of logical lines across pages.
    pub fn line_count(&self) -> usize {
        self.pages().map(Page::line_count).sum()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// File name of the HTML output, derived from the title.
    pub fn html_file_name(&self) -> String {
        self.metadata.html_file_name()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Document title (empty when the source has none)
    pub title: String,

    /// Document author
    pub author: Option<String>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
        }
    }

    /// Lower-cased title with spaces replaced by underscores, plus `.html`.
    pub fn html_file_name(&self) -> String {
        let stem = self.title.trim().to_lowercase().replace(' ', "_");
        if stem.is_empty() {
            "untitled.html".to_string()
        } else {
            format!("{}.html", stem)
        }
    }
}
