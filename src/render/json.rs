//! JSON rendering for reconstructed documents.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontSpec, FontTable, LogicalLine, Metadata, Page, TextRun};
    use std::sync::Arc;

    fn document() -> Document {
        let mut doc = Document::new();
        doc.metadata = Metadata::with_title("Test");
        doc.fonts = FontTable::build(
            vec![FontSpec::new("0", 12, "Times", "#000000")],
            Some("0"),
            None,
            false,
        )
        .unwrap();

        let font = Arc::clone(doc.fonts.get("0").unwrap());
        let mut page = Page::new(1, 1000, 800);
        page.lines
            .insert(100, LogicalLine::new(TextRun::new(100, 50, 80, font, "Hello")));
        doc.add_page(page);
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&document(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Hello"));
        assert!(json.contains("\"role\": \"default\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&document(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pages"]["1"]["lines"]["100"]["runs"][0]["left"], 50);
    }
}
