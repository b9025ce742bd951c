//! Rendering module for converting reconstructed documents to output formats.

mod html;
mod json;
mod options;
mod result;
mod segmenter;

pub use html::{stylesheet, to_html, to_html_with_stats, HtmlRenderer, RenderContext};
pub use json::{to_json, JsonFormat};
pub use options::{BreakStrategy, PageSelection, RenderOptions};
pub use result::{RenderResult, RenderStats};
pub use segmenter::{Break, ParagraphSegmenter};
