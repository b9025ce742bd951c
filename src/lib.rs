//! # pdfreflow
//!
//! Rebuild readable, paragraph-segmented HTML from `pdftohtml -xml` output.
//!
//! `pdftohtml -xml` describes a PDF as positioned text runs. This library
//! merges runs that share a baseline into logical lines, drops running
//! headers and footers by margin, detects paragraph and section breaks, and
//! renders the result as a single HTML file suitable for e-book tooling.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfreflow::{parse_file, render};
//!
//! fn main() -> pdfreflow::Result<()> {
//!     let doc = parse_file("book.xml")?;
//!
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     std::fs::write(doc.html_file_name(), html)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line merging**: runs within `buf` units of an existing line join it
//! - **Margins**: running heads and folios are dropped by vertical position
//! - **Paragraph strategies**: vertical gaps, leading spaces, or indentation
//! - **Chapter numbering**: headings in the chapter font are numbered per render
//! - **Analysis**: gap, indent and font histograms for picking thresholds

pub mod analyze;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analyze::{AnalysisReport, AnalyzeOptions};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf2xml, XmlFormat};
pub use error::{Error, Position, Result};
pub use model::{
    Document, FontRole, FontSpec, FontTable, LayoutConfig, LogicalLine, Metadata, Page, TextRun,
};
pub use parser::{ErrorMode, ParseOptions, SourceDocument, XmlParser};
pub use render::{BreakStrategy, JsonFormat, PageSelection, RenderOptions, RenderResult};

use std::io::Read;
use std::path::Path;

/// Parse a `pdftohtml -xml` file into a reconstructed document.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::parse_file;
///
/// let doc = parse_file("book.xml").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = XmlParser::open(path)?;
    parser.parse()
}

/// Parse a file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new()
///     .strict()
///     .with_para_break(18);
/// let doc = parse_file_with_options("book.xml", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = XmlParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse an XML string.
pub fn parse_xml(xml: &str) -> Result<Document> {
    let parser = XmlParser::from_xml(xml)?;
    parser.parse()
}

/// Parse an XML string with custom options.
pub fn parse_xml_with_options(xml: &str, options: ParseOptions) -> Result<Document> {
    let parser = XmlParser::from_xml_with_options(xml, options)?;
    parser.parse()
}

/// Parse from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = XmlParser::from_bytes(data)?;
    parser.parse()
}

/// Parse from a reader.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("book.xml").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = XmlParser::from_reader(reader)?;
    parser.parse()
}

/// Convert a file to HTML.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::{to_html, BreakStrategy, RenderOptions};
///
/// let options = RenderOptions::new().with_strategy(BreakStrategy::Indent);
/// let html = to_html("book.xml", &options).unwrap();
/// std::fs::write("book.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_html(&doc, options)
}

/// Convert a file to a JSON dump of the reconstructed document.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Collect layout statistics for a file.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::{analyze_file, AnalyzeOptions};
///
/// let report = analyze_file("book.xml", &AnalyzeOptions::default()).unwrap();
/// print!("{}", report);
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P, options: &AnalyzeOptions) -> Result<AnalysisReport> {
    let parser = XmlParser::open(path)?;
    let source = parser.parse_source()?;
    Ok(analyze::analyze(&source, options))
}

/// Builder for parsing and converting documents.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::{BreakStrategy, Reflow};
///
/// let html = Reflow::new()
///     .with_para_break(18)
///     .with_chapter_font("3")
///     .with_strategy(BreakStrategy::Vertical)
///     .parse("book.xml")?
///     .to_html()?;
/// # Ok::<(), pdfreflow::Error>(())
/// ```
pub struct Reflow {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Reflow {
    /// Create a new Reflow builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Treat unresolved font roles as errors.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Override the top margin.
    pub fn with_top_margin(mut self, value: i64) -> Self {
        self.parse_options = self.parse_options.with_top_margin(value);
        self
    }

    /// Override the bottom margin.
    pub fn with_bottom_margin(mut self, value: i64) -> Self {
        self.parse_options = self.parse_options.with_bottom_margin(value);
        self
    }

    /// Override the paragraph break threshold.
    pub fn with_para_break(mut self, value: i64) -> Self {
        self.parse_options = self.parse_options.with_para_break(value);
        self
    }

    /// Override the line merge tolerance.
    pub fn with_buf(mut self, value: i64) -> Self {
        self.parse_options = self.parse_options.with_buf(value);
        self
    }

    /// Override the body text font.
    pub fn with_default_font(mut self, id: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_default_font(id);
        self
    }

    /// Override the chapter heading font.
    pub fn with_chapter_font(mut self, id: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_chapter_font(id);
        self
    }

    /// Set the paragraph break strategy.
    pub fn with_strategy(mut self, strategy: BreakStrategy) -> Self {
        self.render_options = self.render_options.with_strategy(strategy);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Parse a file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<ReflowResult> {
        let parser = XmlParser::open_with_options(path, self.parse_options)?;
        let document = parser.parse()?;
        Ok(ReflowResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<ReflowResult> {
        let parser = XmlParser::from_bytes_with_options(data, self.parse_options)?;
        let document = parser.parse()?;
        Ok(ReflowResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Reflow {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a document with [`Reflow`].
pub struct ReflowResult {
    /// The reconstructed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl ReflowResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to HTML and collect statistics.
    pub fn to_html_with_stats(&self) -> Result<RenderResult> {
        render::to_html_with_stats(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get plain text of the merged lines.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// File name for the HTML output.
    pub fn html_file_name(&self) -> String {
        self.document.html_file_name()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<pdf2xml producer="poppler" version="0.62.0">
<title>The Short Book</title>
<author>A. Writer</author>
<config top_margin="50" bottom_margin="1100" para_break="20" buf="5" default_font="0" chapter_font="1"/>
<page number="1" position="absolute" top="0" left="0" height="1263" width="892">
<fontspec id="0" size="12" family="Times" color="#000000"/>
<fontspec id="1" size="18" family="Times" color="#000000"/>
<text top="20" left="400" width="40" height="12" font="0">7</text>
<text top="100" left="80" width="200" height="18" font="1">Chapter One</text>
<text top="200" left="80" width="300" height="12" font="0">It was a dark</text>
<text top="202" left="390" width="100" height="12" font="0">night.</text>
</page>
</pdf2xml>
"##;

    #[test]
    fn test_reflow_builder() {
        let reflow = Reflow::new()
            .strict()
            .with_para_break(18)
            .with_strategy(BreakStrategy::Indent);

        assert!(matches!(reflow.parse_options.error_mode, ErrorMode::Strict));
        assert_eq!(reflow.parse_options.para_break, Some(18));
        assert_eq!(reflow.render_options.strategy, BreakStrategy::Indent);
    }

    #[test]
    fn test_reflow_builder_default() {
        let builder = Reflow::default();
        assert!(matches!(builder.parse_options.error_mode, ErrorMode::Lenient));
        assert!(!builder.parse_options.has_overrides());
        assert!(matches!(builder.render_options.page_selection, PageSelection::All));
    }

    #[test]
    fn test_reflow_parse_bytes_end_to_end() {
        let result = Reflow::new().parse_bytes(BOOK.as_bytes()).unwrap();
        let html = result.to_html().unwrap();

        assert!(html.contains("<h2>Chapter One 1</h2>\n"));
        assert!(html.contains("It was a dark night.\n"));
        assert!(!html.contains(">7<"));
        assert_eq!(result.html_file_name(), "the_short_book.html");
    }

    #[test]
    fn test_reflow_overrides_config() {
        let result = Reflow::new()
            .with_buf(0)
            .parse_bytes(BOOK.as_bytes())
            .unwrap();

        assert_eq!(result.document().config.buf, 0);
        assert_eq!(result.document().line_count(), 3);
    }

    #[test]
    fn test_parse_xml_rejects_other_roots() {
        let result = parse_xml("<html><body/></html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_parse_bytes_empty_data() {
        let data: [u8; 0] = [];
        assert!(parse_bytes(&data).is_err());
    }

    #[test]
    fn test_parse_reader() {
        let doc = parse_reader(BOOK.as_bytes()).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.metadata.author.as_deref(), Some("A. Writer"));
    }

    #[test]
    fn test_json_format_variants() {
        let result = Reflow::new().parse_bytes(BOOK.as_bytes()).unwrap();
        let pretty = result.to_json(JsonFormat::Pretty).unwrap();
        let compact = result.to_json(JsonFormat::Compact).unwrap();
        assert!(pretty.len() > compact.len());
    }
}
