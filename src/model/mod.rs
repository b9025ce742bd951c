//! Document model types for reconstructed layouts.

mod config;
mod document;
mod font;
mod line;
mod page;

pub use config::LayoutConfig;
pub use document::{Document, Metadata};
pub use font::{FontRole, FontSpec, FontTable};
pub use line::{LogicalLine, TextRun, SPACE_GAP};
pub use page::Page;
