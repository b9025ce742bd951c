//! pdftohtml XML format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Information sniffed from the head of a pdftohtml XML dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlFormat {
    /// Producer recorded on the root element (e.g., "poppler")
    pub producer: Option<String>,
    /// Producer version recorded on the root element
    pub version: Option<String>,
}

impl std::fmt::Display for XmlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pdf2xml")?;
        if let Some(ref producer) = self.producer {
            write!(f, " ({}", producer)?;
            if let Some(ref version) = self.version {
                write!(f, " {}", version)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Root element written by `pdftohtml -xml`.
const ROOT_TAG: &[u8] = b"<pdf2xml";
/// Read size when sniffing a file.
const CHUNK_LEN: usize = 4096;

/// Detect the format from a file path.
///
/// The file is read in chunks until the root element's start tag is
/// complete, so long preambles (comments, an internal DTD) are fine.
///
/// # Example
/// ```no_run
/// use pdfreflow::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("book.xml").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<XmlFormat> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut head = Vec::with_capacity(CHUNK_LEN);
    let mut chunk = [0u8; CHUNK_LEN];

    loop {
        let read = reader.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..read]);
        if root_tag(&head).is_some_and(|tag| tag.ends_with(b">")) {
            break;
        }
    }
    detect_format_from_bytes(&head)
}

/// Detect the format of a document held in memory.
///
/// # Returns
/// * `Ok(XmlFormat)` if a `<pdf2xml` root element appears
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<XmlFormat> {
    let tag = root_tag(data).ok_or(Error::UnknownFormat)?;
    let tag = String::from_utf8_lossy(tag);

    Ok(XmlFormat {
        producer: attribute_value(&tag, "producer"),
        version: attribute_value(&tag, "version"),
    })
}

/// Bytes of the root start tag, up to and including `>` when present.
fn root_tag(data: &[u8]) -> Option<&[u8]> {
    let start = data
        .windows(ROOT_TAG.len())
        .position(|window| window == ROOT_TAG)?;
    let tag = &data[start..];
    let end = tag.iter().position(|&b| b == b'>').map_or(tag.len(), |i| i + 1);
    Some(&tag[..end])
}

/// Check if bytes look like a pdftohtml XML dump.
pub fn is_pdf2xml_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

/// Check if a file looks like a pdftohtml XML dump.
pub fn is_pdf2xml<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

fn attribute_value(tag: &str, name: &str) -> Option<String> {
    let needle = format!("{}=", name);
    let start = tag.find(&needle)? + needle.len();
    let rest = &tag[start..];
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    rest.find(quote).map(|end| rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_poppler_output() {
        let data = br#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE pdf2xml SYSTEM "pdf2xml.dtd">
<pdf2xml producer="poppler" version="0.62.0">
<page number="1" position="absolute" top="0" left="0" height="1263" width="892">"#;
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.producer.as_deref(), Some("poppler"));
        assert_eq!(format.version.as_deref(), Some("0.62.0"));
        assert_eq!(format.to_string(), "pdf2xml (poppler 0.62.0)");
    }

    #[test]
    fn test_detect_bare_root() {
        let format = detect_format_from_bytes(b"<pdf2xml><page/></pdf2xml>").unwrap();
        assert!(format.producer.is_none());
        assert_eq!(format.to_string(), "pdf2xml");
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"<!DOCTYPE html><html></html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));

        let result = detect_format_from_bytes(b"%PDF-1.7");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_after_long_preamble() {
        let mut data = String::from("<?xml version=\"1.0\"?>\n");
        for i in 0..400 {
            data.push_str(&format!("<!-- generated by pass {} of the layout tool -->\n", i));
        }
        data.push_str("<pdf2xml producer=\"poppler\" version=\"22.02.0\"></pdf2xml>");
        assert!(data.len() > 2 * CHUNK_LEN);

        let format = detect_format_from_bytes(data.as_bytes()).unwrap();
        assert_eq!(format.version.as_deref(), Some("22.02.0"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.xml");
        std::fs::write(&path, &data).unwrap();
        let format = detect_format_from_path(&path).unwrap();
        assert_eq!(format.producer.as_deref(), Some("poppler"));
    }

    #[test]
    fn test_is_pdf2xml_bytes() {
        assert!(is_pdf2xml_bytes(b"<pdf2xml></pdf2xml>"));
        assert!(!is_pdf2xml_bytes(b""));
        assert!(!is_pdf2xml_bytes(b"Not XML"));
    }
}
