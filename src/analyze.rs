//! Layout statistics for choosing thresholds.
//!
//! The analyzer works on the raw source runs, before margins are applied or
//! lines are merged, so that the numbers reflect what `pdftohtml` produced.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::parser::{SourceDocument, SourcePage};

/// Number of vertical gaps reported.
pub const TOP_GAPS: usize = 10;

/// Left positions strictly inside this band are reported.
const LEFT_BAND: (i64, i64) = (50, 100);

/// Options for the analyzer.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Only lines above this top take part in gap counting
    pub max_top: Option<i64>,
}

impl AnalyzeOptions {
    /// Create new analyzer options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore lines at or below `max_top` when counting gaps.
    pub fn with_max_top(mut self, max_top: i64) -> Self {
        self.max_top = Some(max_top);
        self
    }
}

/// How often a vertical gap between consecutive lines occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapStat {
    pub gap: i64,
    pub count: usize,
    /// Text of the first line seen after this gap
    pub example: String,
}

/// How often lines start at a given left position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeftStat {
    pub left: i64,
    pub count: usize,
    pub example: String,
}

/// How many runs use a font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontStat {
    pub css_class: String,
    pub count: usize,
    /// Text of the first run seen in this font
    pub example: String,
}

/// Result of analyzing a source document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub page_count: usize,
    pub run_count: usize,
    /// Most frequent gaps, at most [`TOP_GAPS`]
    pub gaps: Vec<GapStat>,
    /// Left positions inside the indent band
    pub lefts: Vec<LeftStat>,
    pub fonts: Vec<FontStat>,
}

/// Counter that remembers the first example seen for each key.
struct Tally<K> {
    counts: HashMap<K, (usize, String)>,
}

impl<K: std::hash::Hash + Eq + Ord + Clone> Tally<K> {
    fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    fn add(&mut self, key: K, example: &str) {
        self.counts
            .entry(key)
            .or_insert_with(|| (0, example.to_string()))
            .0 += 1;
    }

    /// Entries by count descending, then key ascending.
    fn most_common(self) -> Vec<(K, usize, String)> {
        let mut entries: Vec<_> = self
            .counts
            .into_iter()
            .map(|(k, (count, example))| (k, count, example))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

/// A line as the analyzer sees it: runs at exactly the same top.
struct RawLine {
    top: i64,
    left: i64,
    text: String,
}

fn raw_lines(page: &SourcePage) -> Vec<RawLine> {
    let mut by_top: BTreeMap<i64, Vec<(i64, &str)>> = BTreeMap::new();
    for run in &page.runs {
        by_top
            .entry(run.top)
            .or_default()
            .push((run.left, run.text.as_str()));
    }

    by_top
        .into_iter()
        .map(|(top, mut runs)| {
            runs.sort_by_key(|&(left, _)| left);
            RawLine {
                top,
                left: runs[0].0,
                text: runs
                    .iter()
                    .map(|&(_, text)| text)
                    .collect::<Vec<_>>()
                    .join(" "),
            }
        })
        .collect()
}

/// Collect gap, left and font statistics for a source document.
pub fn analyze(source: &SourceDocument, options: &AnalyzeOptions) -> AnalysisReport {
    let mut gaps = Tally::new();
    let mut lefts = Tally::new();
    let mut fonts = Tally::new();

    for page in &source.pages {
        for run in &page.runs {
            fonts.add(run.font.id.clone(), &run.text);
        }

        let mut last_top = None;
        for line in raw_lines(page) {
            lefts.add(line.left, &line.text);

            if options.max_top.is_some_and(|max| line.top >= max) {
                continue;
            }
            if let Some(previous) = last_top {
                gaps.add(line.top.saturating_sub(previous), &line.text);
            }
            last_top = Some(line.top);
        }
    }

    let report = AnalysisReport {
        page_count: source.pages.len(),
        run_count: source.run_count(),
        gaps: gaps
            .most_common()
            .into_iter()
            .take(TOP_GAPS)
            .map(|(gap, count, example)| GapStat {
                gap,
                count,
                example,
            })
            .collect(),
        lefts: lefts
            .most_common()
            .into_iter()
            .filter(|(left, _, _)| LEFT_BAND.0 < *left && *left < LEFT_BAND.1)
            .map(|(left, count, example)| LeftStat {
                left,
                count,
                example,
            })
            .collect(),
        fonts: fonts
            .most_common()
            .into_iter()
            .map(|(id, count, example)| FontStat {
                css_class: format!("class_{}", id),
                count,
                example,
            })
            .collect(),
    };

    log::debug!(
        "Analyzed {} runs on {} pages: {} distinct gaps reported",
        report.run_count,
        report.page_count,
        report.gaps.len()
    );
    report
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stat in &self.gaps {
            writeln!(
                f,
                "diff: {:>4}  count: {:>4}  example: {}",
                stat.gap, stat.count, stat.example
            )?;
        }
        for stat in &self.lefts {
            writeln!(
                f,
                "left: {:>4}  count: {:>4}  example: {}",
                stat.left, stat.count, stat.example
            )?;
        }
        for stat in &self.fonts {
            writeln!(
                f,
                "font {:>8}: {:>7} {}",
                stat.css_class, stat.count, stat.example
            )?;
        }
        Ok(())
    }
}
