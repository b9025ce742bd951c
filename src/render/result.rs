//! Rendering result with metadata and statistics.

use crate::model::Metadata;
use serde::Serialize;

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    /// The rendered HTML
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: RenderStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Number of pages rendered
    pub page_count: u32,

    /// Number of logical lines rendered
    pub line_count: u32,

    /// Number of paragraph markers emitted
    pub paragraph_breaks: u32,

    /// Number of section markers emitted
    pub section_breaks: u32,

    /// Number of chapter headings emitted
    pub chapter_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment page count.
    pub fn add_page(&mut self) {
        self.page_count += 1;
    }

    /// Count a rendered line and its words.
    pub fn add_line(&mut self, text: &str) {
        self.line_count += 1;
        self.word_count += text.split_whitespace().count() as u32;
    }

    /// Increment paragraph break count.
    pub fn add_paragraph_break(&mut self) {
        self.paragraph_breaks += 1;
    }

    /// Increment section break count.
    pub fn add_section_break(&mut self) {
        self.section_breaks += 1;
    }

    /// Increment chapter count.
    pub fn add_chapter(&mut self) {
        self.chapter_count += 1;
    }
}
