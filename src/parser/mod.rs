//! pdftohtml XML parsing module.

mod layout;
mod merger;
mod options;
mod source;
mod xml_parser;

pub use layout::{build_document, build_page};
pub use merger::LineMerger;
pub use options::{ErrorMode, ParseOptions};
pub use source::{SourceDocument, SourcePage};
pub use xml_parser::XmlParser;
