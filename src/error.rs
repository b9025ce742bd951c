//! Error types for pdfreflow library.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for pdfreflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Location of a text run in the source, reported so a human can find it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Page number as given by the source
    pub page: u32,
    /// Vertical coordinate, if it could be read
    pub top: Option<i64>,
    /// Horizontal coordinate, if it could be read
    pub left: Option<i64>,
}

impl Position {
    /// Position of a whole page.
    pub fn page(page: u32) -> Self {
        Self {
            page,
            top: None,
            left: None,
        }
    }

    /// Position of a run on a page.
    pub fn run(page: u32, top: Option<i64>, left: Option<i64>) -> Self {
        Self { page, top, left }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}", self.page)?;
        match (self.top, self.left) {
            (None, None) => Ok(()),
            (top, left) => write!(
                f,
                " (top={}, left={})",
                top.map_or_else(|| "?".to_string(), |t| t.to_string()),
                left.map_or_else(|| "?".to_string(), |l| l.to_string())
            ),
        }
    }
}

/// Error types that can occur while reconstructing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a pdftohtml XML dump.
    #[error("Unknown file format: not a pdftohtml XML document")]
    UnknownFormat,

    /// The XML itself could not be parsed.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// A font specification is missing its id or has a bad size.
    #[error("Malformed font spec {}: {reason}", .id.as_deref().unwrap_or("<no id>"))]
    MalformedFontSpec {
        /// Font id, when present
        id: Option<String>,
        /// What was wrong
        reason: String,
    },

    /// A page or text run is missing a required numeric attribute.
    #[error("Malformed input at {position}: {reason}")]
    MalformedInput {
        /// Where the problem was found
        position: Position,
        /// What was wrong
        reason: String,
    },

    /// A text run references a font id that is not in the font table.
    #[error("Unknown font '{font}' at {position}")]
    MissingFont {
        /// The unresolved font id
        font: String,
        /// Where the run was found
        position: Position,
    },

    /// A `<config>` value is not a number, or a font role does not resolve
    /// in strict mode.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error during rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
