//! Parsing options and configuration.

use crate::model::LayoutConfig;

/// Options for parsing pdftohtml XML documents.
///
/// Every `Some` override replaces the matching value of the document's
/// `<config>` block, so thresholds can be tuned without editing the XML.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Error handling mode for configuration problems
    pub error_mode: ErrorMode,

    /// Override for the top margin
    pub top_margin: Option<i64>,

    /// Override for the bottom margin
    pub bottom_margin: Option<i64>,

    /// Override for the paragraph break threshold
    pub para_break: Option<i64>,

    /// Override for the same-line tolerance
    pub buf: Option<i64>,

    /// Override for the body text font id
    pub default_font: Option<String>,

    /// Override for the chapter heading font id
    pub chapter_font: Option<String>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Treat unresolved font roles as errors.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Override the top margin.
    pub fn with_top_margin(mut self, value: i64) -> Self {
        self.top_margin = Some(value);
        self
    }

    /// Override the bottom margin.
    pub fn with_bottom_margin(mut self, value: i64) -> Self {
        self.bottom_margin = Some(value);
        self
    }

    /// Override the paragraph break threshold.
    pub fn with_para_break(mut self, value: i64) -> Self {
        self.para_break = Some(value);
        self
    }

    /// Override the same-line tolerance.
    pub fn with_buf(mut self, value: i64) -> Self {
        self.buf = Some(value);
        self
    }

    /// Override the body text font id.
    pub fn with_default_font(mut self, id: impl Into<String>) -> Self {
        self.default_font = Some(id.into());
        self
    }

    /// Override the chapter heading font id.
    pub fn with_chapter_font(mut self, id: impl Into<String>) -> Self {
        self.chapter_font = Some(id.into());
        self
    }

    /// Check if any layout value is overridden.
    pub fn has_overrides(&self) -> bool {
        self.top_margin.is_some()
            || self.bottom_margin.is_some()
            || self.para_break.is_some()
            || self.buf.is_some()
            || self.default_font.is_some()
            || self.chapter_font.is_some()
    }

    /// Apply the overrides on top of a config read from the source.
    pub fn apply(&self, mut config: LayoutConfig) -> LayoutConfig {
        if let Some(v) = self.top_margin {
            config.top_margin = v;
        }
        if let Some(v) = self.bottom_margin {
            config.bottom_margin = v;
        }
        if let Some(v) = self.para_break {
            config.para_break = v;
        }
        if let Some(v) = self.buf {
            config.buf = v;
        }
        if let Some(ref id) = self.default_font {
            config.default_font = Some(id.clone());
        }
        if let Some(ref id) = self.chapter_font {
            config.chapter_font = Some(id.clone());
        }
        config
    }
}

/// Error handling mode during parsing.
///
/// Malformed fonts, pages and runs always abort; the mode only decides what
/// happens when a configured font role matches no font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail when a configured font role does not resolve
    Strict,
    /// Log a warning and render without that role
    #[default]
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .strict()
            .with_para_break(30)
            .with_buf(5)
            .with_chapter_font("3");

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.para_break, Some(30));
        assert_eq!(options.buf, Some(5));
        assert_eq!(options.chapter_font.as_deref(), Some("3"));
        assert!(options.has_overrides());
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.has_overrides());
    }

    #[test]
    fn test_apply_overrides_only_set_fields() {
        let source = LayoutConfig::new()
            .with_top_margin(10)
            .with_bottom_margin(1100)
            .with_para_break(20)
            .with_default_font("0");

        let config = ParseOptions::new()
            .with_bottom_margin(900)
            .with_chapter_font("2")
            .apply(source);

        assert_eq!(config.top_margin, 10);
        assert_eq!(config.bottom_margin, 900);
        assert_eq!(config.para_break, 20);
        assert_eq!(config.default_font.as_deref(), Some("0"));
        assert_eq!(config.chapter_font.as_deref(), Some("2"));
    }
}
