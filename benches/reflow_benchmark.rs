//! Benchmarks for pdfreflow parsing and rendering.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic pdftohtml XML.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfreflow::render::{to_html, RenderOptions};
use pdfreflow::{AnalyzeOptions, BreakStrategy, XmlParser};

/// Creates a synthetic pdf2xml document with the given number of pages.
///
/// Every third line is split into two runs one unit apart so that the
/// line merger has work to do.
fn create_test_xml(page_count: usize) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <pdf2xml producer=\"poppler\" version=\"0.62.0\">\n\
         <title>Benchmark</title>\n\
         <config top_margin=\"60\" bottom_margin=\"1100\" para_break=\"20\" buf=\"5\" default_font=\"0\" chapter_font=\"1\"/>\n",
    );

    for p in 0..page_count {
        xml.push_str(&format!(
            "<page number=\"{}\" position=\"absolute\" top=\"0\" left=\"0\" height=\"1263\" width=\"892\">\n",
            p + 1
        ));
        if p == 0 {
            xml.push_str("<fontspec id=\"0\" size=\"12\" family=\"Times\" color=\"#000000\"/>\n");
            xml.push_str("<fontspec id=\"1\" size=\"18\" family=\"Times\" color=\"#000000\"/>\n");
        }
        xml.push_str(&format!(
            "<text top=\"30\" left=\"420\" width=\"40\" height=\"12\" font=\"0\">{}</text>\n",
            p + 1
        ));
        if p % 10 == 0 {
            xml.push_str("<text top=\"80\" left=\"100\" width=\"200\" height=\"18\" font=\"1\">Chapter</text>\n");
        }
        for i in 0..50 {
            let top = 120 + i * 18 + if i % 7 == 0 { 12 } else { 0 };
            if i % 3 == 0 {
                xml.push_str(&format!(
                    "<text top=\"{}\" left=\"100\" width=\"300\" height=\"12\" font=\"0\">Line {} of the benchmark</text>\n\
                     <text top=\"{}\" left=\"410\" width=\"200\" height=\"12\" font=\"0\">continues here.</text>\n",
                    top,
                    i,
                    top + 1
                ));
            } else {
                xml.push_str(&format!(
                    "<text top=\"{}\" left=\"100\" width=\"500\" height=\"12\" font=\"0\">Line {} of page {}</text>\n",
                    top,
                    i,
                    p + 1
                ));
            }
        }
        xml.push_str("</page>\n");
    }

    xml.push_str("</pdf2xml>\n");
    xml
}

/// Benchmark format detection.
fn bench_format_detection(c: &mut Criterion) {
    let xml = create_test_xml(1);
    let not_xml = b"Not a pdf2xml file at all, just random text content";

    c.bench_function("detect_pdf2xml", |b| {
        b.iter(|| pdfreflow::detect_format_from_bytes(black_box(xml.as_bytes())).unwrap());
    });

    c.bench_function("detect_other", |b| {
        b.iter(|| pdfreflow::detect_format_from_bytes(black_box(not_xml)).is_err());
    });
}

/// Benchmark parsing and line merging at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for page_count in [1, 10, 100].iter() {
        let xml = create_test_xml(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| pdfreflow::parse_xml(black_box(&xml)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark HTML rendering per strategy.
fn bench_rendering(c: &mut Criterion) {
    let doc = pdfreflow::parse_xml(&create_test_xml(100)).unwrap();
    let mut group = c.benchmark_group("rendering");

    for strategy in [BreakStrategy::Vertical, BreakStrategy::Spaces, BreakStrategy::Indent] {
        let options = RenderOptions::new().with_strategy(strategy);
        group.bench_function(strategy.as_str(), |b| {
            b.iter(|| to_html(black_box(&doc), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the analysis report.
fn bench_analysis(c: &mut Criterion) {
    let xml = create_test_xml(100);
    let source = XmlParser::from_xml(&xml).unwrap().parse_source().unwrap();

    c.bench_function("analyze_100_pages", |b| {
        b.iter(|| pdfreflow::analyze::analyze(black_box(&source), &AnalyzeOptions::default()));
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_parsing,
    bench_rendering,
    bench_analysis,
);
criterion_main!(benches);
