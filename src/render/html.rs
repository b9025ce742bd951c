//! HTML rendering for reconstructed documents.

use crate::error::Result;
use crate::model::{Document, FontRole, FontTable, LogicalLine, Page, TextRun};

use super::{Break, ParagraphSegmenter, RenderOptions, RenderResult, RenderStats};

const DOCTYPE: &str = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN"
  "http://www.w3.org/TR/html4/strict.dtd">"#;

const PARAGRAPH_MARKER: &str = "<p>\n";
const SECTION_MARKER: &str = "<p class=\"section\">-<p>\n";

/// Paragraph rules appended after the per-font rules.
const BASE_CSS: &str = "p{text-indent:1.5em;margin:0}\n\
p.section{text-indent:0;margin-top:1em}\n\
p.author{text-indent:0;margin-top:1em;page-break-after:always;}\n";

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to HTML with statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = HtmlRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Per-render state. A fresh context numbers chapters from 1 again.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    chapter_number: u32,
}

impl RenderContext {
    /// Create a new context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance and return the chapter counter.
    pub fn next_chapter(&mut self) -> u32 {
        self.chapter_number += 1;
        self.chapter_number
    }

    /// Chapters numbered so far.
    pub fn chapter_count(&self) -> u32 {
        self.chapter_number
    }
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: RenderStats,
    context: RenderContext,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
            context: RenderContext::new(),
        }
    }

    /// Render a document to HTML.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to HTML with rendering statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;
        Ok(RenderResult::new(content, doc.metadata.clone(), self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, doc);

        let mut segmenter = ParagraphSegmenter::new(self.options.strategy, doc.config.para_break);
        for page in doc.pages() {
            if self.options.page_selection.includes(page.number) {
                self.render_page(&mut output, page, &mut segmenter);
            }
        }

        log::debug!(
            "Rendered {} chapters with {} strategy",
            self.context.chapter_count(),
            self.options.strategy
        );
        Ok(output)
    }

    fn render_header(&self, output: &mut String, doc: &Document) {
        let title = html_escape::encode_text(&doc.metadata.title);

        output.push_str(DOCTYPE);
        output.push_str("\n<html>\n  <head>\n");
        output.push_str("  <meta http-equiv=\"content-type\" content=\"text/html; charset=UTF-8\">\n");
        output.push_str(&format!("<title>{}</title>\n", title));
        output.push_str(&stylesheet(&doc.fonts));
        output.push_str("\n</head>\n<body>\n");
        output.push_str(&format!("<h1>{}</h1>\n", title));
        if let Some(ref author) = doc.metadata.author {
            output.push_str(&format!(
                "<p class=\"author\">by {}\n",
                html_escape::encode_text(author)
            ));
        }
        output.push('\n');
    }

    fn render_page(&mut self, output: &mut String, page: &Page, segmenter: &mut ParagraphSegmenter) {
        if self.options.collect_stats {
            self.stats.add_page();
        }
        output.push_str(&format!("<!-- Page {} -->\n", page.number));

        segmenter.start_page();
        for line in page.lines() {
            let decision = segmenter.next_line(line);
            self.render_break(output, decision);
            self.render_line(output, line);
        }
    }

    fn render_break(&mut self, output: &mut String, decision: Break) {
        match decision {
            Break::None => {}
            Break::Paragraph => {
                if self.options.collect_stats {
                    self.stats.add_paragraph_break();
                }
                output.push_str(PARAGRAPH_MARKER);
            }
            Break::Section => {
                if self.options.collect_stats {
                    self.stats.add_section_break();
                }
                output.push_str(SECTION_MARKER);
            }
        }
    }

    fn render_line(&mut self, output: &mut String, line: &LogicalLine) {
        if self.options.collect_stats {
            self.stats.add_line(&line.text());
        }
        for (spaced, run) in line.spaced_runs() {
            if spaced {
                output.push(' ');
            }
            self.render_run(output, run);
        }
        output.push('\n');
    }

    fn render_run(&mut self, output: &mut String, run: &TextRun) {
        match run.font.role {
            FontRole::Default => output.push_str(&run.text),
            FontRole::Chapter => {
                let number = self.context.next_chapter();
                if self.options.collect_stats {
                    self.stats.add_chapter();
                }
                output.push_str(&format!("<h2>{} {}</h2>", run.text, number));
            }
            FontRole::Other => {
                output.push_str(&format!(
                    "<span class=\"{}\">{}</span>",
                    run.font.css_class(),
                    run.text
                ));
            }
        }
    }
}

/// Build the `<style>` block for a font table.
///
/// The default font styles `body`, the chapter font styles `h2` and its own
/// class, and every other font gets a class of its own.
pub fn stylesheet(fonts: &FontTable) -> String {
    let mut css = String::from("<style type=\"text/css\">\n");
    for font in fonts.iter() {
        match font.role {
            FontRole::Default => {
                css.push_str(&format!("body {{{}}}\n", font.css_style()));
            }
            FontRole::Chapter => {
                css.push_str(&format!("h2 {{{}}}\n", font.css_style()));
                css.push_str(&format!(".{} {{{}}}\n", font.css_class(), font.css_style()));
            }
            FontRole::Other => {
                css.push_str(&format!(".{} {{{}}}\n", font.css_class(), font.css_style()));
            }
        }
    }
    css.push_str(BASE_CSS);
    css.push_str("</style>");
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontSpec, LayoutConfig, Metadata};
    use std::sync::Arc;

    fn fonts() -> FontTable {
        FontTable::build(
            vec![
                FontSpec::new("0", 12, "Times", "#000000"),
                FontSpec::new("1", 18, "Times", "#000000"),
                FontSpec::new("2", 9, "Arial", "#555555"),
            ],
            Some("0"),
            Some("1"),
            false,
        )
        .unwrap()
    }

    fn run(fonts: &FontTable, id: &str, top: i64, left: i64, width: i64, text: &str) -> TextRun {
        TextRun::new(top, left, width, Arc::clone(fonts.get(id).unwrap()), text)
    }

    fn document(lines: Vec<LogicalLine>) -> Document {
        let mut doc = Document::new();
        doc.metadata = Metadata::with_title("Test & Title");
        doc.config = LayoutConfig::new().with_para_break(20).with_buf(5);
        doc.fonts = fonts();
        let mut page = Page::new(1, 1000, 800);
        for line in lines {
            page.lines.insert(line.top, line);
        }
        doc.add_page(page);
        doc
    }

    #[test]
    fn test_stylesheet_rules() {
        let css = stylesheet(&fonts());
        assert!(css.contains("body {font-family:Times;font-size:100%;color:#000000;}"));
        assert!(css.contains("h2 {font-family:Times;font-size:150%;color:#000000;}"));
        assert!(css.contains(".class_1 {"));
        assert!(css.contains(".class_2 {font-family:Arial;font-size:75%;color:#555555;}"));
        assert!(!css.contains(".class_0"));
        assert!(css.contains("p.section{"));
    }

    #[test]
    fn test_run_markup_by_role() {
        let f = fonts();
        let mut line = LogicalLine::new(run(&f, "0", 100, 0, 40, "body"));
        line.add_run(run(&f, "2", 100, 42, 10, "small"));
        let doc = document(vec![line]);

        let html = to_html(&doc, &RenderOptions::default()).unwrap();
        assert!(html.contains("body<span class=\"class_2\">small</span>\n"));
    }

    #[test]
    fn test_composite_line_spacing() {
        let f = fonts();
        let mut wide = LogicalLine::new(run(&f, "0", 100, 0, 10, "left"));
        wide.add_run(run(&f, "0", 100, 20, 10, "right"));
        let mut tight = LogicalLine::new(run(&f, "0", 110, 0, 10, "tight"));
        tight.add_run(run(&f, "0", 110, 13, 10, "er"));
        let doc = document(vec![wide, tight]);

        let html = to_html(&doc, &RenderOptions::default()).unwrap();
        assert!(html.contains("left right\n"));
        assert!(html.contains("tighter\n"));
    }

    #[test]
    fn test_header_escapes_title_and_skips_missing_author() {
        let doc = document(vec![]);
        let html = to_html(&doc, &RenderOptions::default()).unwrap();

        assert!(html.starts_with("<!DOCTYPE HTML PUBLIC"));
        assert!(html.contains("<title>Test &amp; Title</title>"));
        assert!(html.contains("<h1>Test &amp; Title</h1>"));
        assert!(!html.contains("class=\"author\""));
        assert!(html.contains("<!-- Page 1 -->\n"));
    }

    #[test]
    fn test_author_line() {
        let mut doc = document(vec![]);
        doc.metadata.author = Some("Susanna Clarke".to_string());
        let html = to_html(&doc, &RenderOptions::default()).unwrap();
        assert!(html.contains("<p class=\"author\">by Susanna Clarke\n"));
    }

    #[test]
    fn test_chapter_numbers_restart_per_render() {
        let f = fonts();
        let doc = document(vec![
            LogicalLine::new(run(&f, "1", 100, 0, 100, "One")),
            LogicalLine::new(run(&f, "1", 300, 0, 100, "Two")),
        ]);

        let renderer = HtmlRenderer::new(RenderOptions::default());
        let first = renderer.render(&doc).unwrap();
        let second = to_html(&doc, &RenderOptions::default()).unwrap();

        assert!(first.contains("<h2>One 1</h2>"));
        assert!(first.contains("<h2>Two 2</h2>"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_break_markers() {
        let f = fonts();
        let doc = document(vec![
            LogicalLine::new(run(&f, "0", 100, 0, 100, "a")),
            LogicalLine::new(run(&f, "0", 125, 0, 100, "b")),
            LogicalLine::new(run(&f, "0", 175, 0, 100, "c")),
        ]);

        let result = to_html_with_stats(&doc, &RenderOptions::default()).unwrap();
        assert!(result.content.contains("a\n<p>\nb\n<p class=\"section\">-<p>\nc\n"));
        assert_eq!(result.stats.paragraph_breaks, 1);
        assert_eq!(result.stats.section_breaks, 1);
        assert_eq!(result.stats.line_count, 3);
        assert_eq!(result.stats.page_count, 1);
    }
}
