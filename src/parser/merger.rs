//! Grouping of text runs into logical lines.

use std::collections::BTreeMap;

use crate::model::{LogicalLine, TextRun};

/// Merges runs sharing an approximate vertical position into logical lines.
///
/// A run joins the first existing line whose key lies in
/// `[top - buf, top + buf)`, scanning keys in ascending order. The first
/// match wins even if a later key is closer. Runs that match nothing start
/// a new line keyed by their own `top`.
#[derive(Debug, Clone, Default)]
pub struct LineMerger {
    buf: i64,
    lines: BTreeMap<i64, LogicalLine>,
}

impl LineMerger {
    /// Create a merger with the given same-line tolerance.
    pub fn new(buf: i64) -> Self {
        Self {
            buf: buf.max(0),
            lines: BTreeMap::new(),
        }
    }

    /// Merge one run.
    pub fn push(&mut self, run: TextRun) {
        match self.find_key(run.top) {
            Some(key) => {
                log::trace!("merging run at top={} into line {}", run.top, key);
                if let Some(line) = self.lines.get_mut(&key) {
                    line.add_run(run);
                }
            }
            None => {
                self.lines.insert(run.top, LogicalLine::new(run));
            }
        }
    }

    /// Merge every run of an iterator, in order.
    pub fn extend<I: IntoIterator<Item = TextRun>>(&mut self, runs: I) {
        for run in runs {
            self.push(run);
        }
    }

    /// Number of lines built so far.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if no line has been built.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Finish merging and return the lines keyed by top.
    pub fn finish(self) -> BTreeMap<i64, LogicalLine> {
        self.lines
    }

    fn find_key(&self, top: i64) -> Option<i64> {
        if self.buf == 0 {
            // Empty window: only an exact key can absorb the run
            return self.lines.contains_key(&top).then_some(top);
        }
        self.lines
            .range(top.saturating_sub(self.buf)..top.saturating_add(self.buf))
            .next()
            .map(|(key, _)| *key)
    }
}
