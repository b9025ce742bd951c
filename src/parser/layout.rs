//! Page model construction: margin filtering and line merging.

use crate::model::{Document, LayoutConfig, Page};

use super::{LineMerger, SourceDocument, SourcePage};

/// Build a page from its source runs.
///
/// Runs that are blank after trimming, or whose `top` falls outside
/// `[top_margin, bottom_margin]`, are dropped before merging.
pub fn build_page(source: SourcePage, config: &LayoutConfig) -> Page {
    let total = source.runs.len();
    let mut merger = LineMerger::new(config.buf);
    merger.extend(
        source
            .runs
            .into_iter()
            .filter(|run| !run.is_blank() && config.within_margins(run.top)),
    );

    let mut page = Page::new(source.number, source.height, source.width);
    page.lines = merger.finish();

    log::debug!(
        "Page {}: {} runs merged into {} lines",
        page.number,
        total,
        page.line_count()
    );
    page
}

/// Build the full document model from a parsed source.
pub fn build_document(source: SourceDocument) -> Document {
    if !source.has_config {
        log::warn!("No <config> block found; all thresholds are 0 and no font has a role");
    }

    let mut doc = Document::new();
    for source_page in source.pages {
        doc.add_page(build_page(source_page, &source.config));
    }
    doc.metadata = source.metadata;
    doc.config = source.config;
    doc.fonts = source.fonts;
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontSpec, TextRun};
    use std::sync::Arc;

    fn run(top: i64, left: i64, text: &str) -> TextRun {
        let font = Arc::new(FontSpec::new("0", 12, "Times", "#000000"));
        TextRun::new(top, left, 10, font, text)
    }

    fn config() -> LayoutConfig {
        LayoutConfig::new()
            .with_top_margin(50)
            .with_bottom_margin(1000)
            .with_buf(3)
    }

    #[test]
    fn test_margin_exclusion() {
        let mut source = SourcePage::new(1, 1200, 900);
        source.runs = vec![
            run(20, 0, "Running header"),
            run(49, 0, "just above"),
            run(50, 0, "first kept"),
            run(500, 0, "body"),
            run(1000, 0, "last kept"),
            run(1001, 0, "just below"),
            run(1150, 0, "17"),
        ];

        let page = build_page(source, &config());
        let tops: Vec<i64> = page.lines.keys().copied().collect();
        assert_eq!(tops, vec![50, 500, 1000]);
    }

    #[test]
    fn test_blank_runs_never_create_lines() {
        let mut source = SourcePage::new(1, 1200, 900);
        source.runs = vec![run(100, 0, "   "), run(200, 0, ""), run(300, 0, "text")];

        let page = build_page(source, &config());
        assert_eq!(page.line_count(), 1);
        assert!(page.line_at(100).is_none());
    }

    #[test]
    fn test_dimensions_recorded_verbatim() {
        let page = build_page(SourcePage::new(7, 1263, 892), &config());
        assert_eq!(page.number, 7);
        assert_eq!(page.height, 1263);
        assert_eq!(page.width, 892);
        assert!(page.is_empty());
    }

    #[test]
    fn test_build_document_keeps_page_order() {
        let mut source = SourceDocument {
            config: config(),
            ..Default::default()
        };
        let mut second = SourcePage::new(2, 1200, 900);
        second.runs.push(run(100, 0, "two"));
        let mut first = SourcePage::new(1, 1200, 900);
        first.runs.push(run(100, 0, "one"));
        source.pages = vec![second, first];

        let doc = build_document(source);
        assert_eq!(doc.plain_text(), "one\n\ntwo");
    }
}
