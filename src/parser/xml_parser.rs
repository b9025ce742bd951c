//! pdftohtml XML parser implementation.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use roxmltree::{Document as XmlDocument, Node, ParsingOptions};

use crate::detect::{detect_format_from_bytes, XmlFormat};
use crate::error::{Error, Position, Result};
use crate::model::{Document, FontSpec, FontTable, LayoutConfig, Metadata, TextRun};

use super::{build_document, ErrorMode, ParseOptions, SourceDocument, SourcePage};

/// Parser for `pdftohtml -xml` output.
pub struct XmlParser {
    data: String,
    format: XmlFormat,
    options: ParseOptions,
}

impl XmlParser {
    /// Open an XML file from a path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an XML file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Create a parser from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let format = detect_format_from_bytes(data)?;
        let data = String::from_utf8(data.to_vec())
            .map_err(|e| Error::Xml(format!("input is not valid UTF-8: {}", e)))?;
        Ok(Self {
            data,
            format,
            options,
        })
    }

    /// Create a parser from an XML string.
    pub fn from_xml(xml: &str) -> Result<Self> {
        Self::from_bytes(xml.as_bytes())
    }

    /// Create a parser from an XML string with custom options.
    pub fn from_xml_with_options(xml: &str, options: ParseOptions) -> Result<Self> {
        Self::from_bytes_with_options(xml.as_bytes(), options)
    }

    /// Create a parser from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Create a parser from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Format information sniffed from the input.
    pub fn format(&self) -> &XmlFormat {
        &self.format
    }

    /// Parse into the typed source view without filtering or merging.
    pub fn parse_source(&self) -> Result<SourceDocument> {
        let xml = XmlDocument::parse_with_options(
            &self.data,
            ParsingOptions {
                allow_dtd: true,
                ..ParsingOptions::default()
            },
        )?;

        let root = xml.root_element();
        if root.tag_name().name() != "pdf2xml" {
            return Err(Error::UnknownFormat);
        }

        let metadata = Metadata {
            title: text_value(root, "title").unwrap_or_default(),
            author: text_value(root, "author"),
        };

        let config_node = root
            .descendants()
            .find(|n| n.has_tag_name("config"));
        let has_config = config_node.is_some();
        let config = match config_node {
            Some(node) => parse_config(node)?,
            None => LayoutConfig::default(),
        };
        let config = self.options.apply(config);

        let specs = root
            .descendants()
            .filter(|n| n.has_tag_name("fontspec"))
            .map(parse_fontspec)
            .collect::<Result<Vec<_>>>()?;
        let fonts = FontTable::build(
            specs,
            config.default_font.as_deref(),
            config.chapter_font.as_deref(),
            self.options.error_mode == ErrorMode::Strict,
        )?;

        let mut pages = Vec::new();
        for page_node in root.descendants().filter(|n| n.has_tag_name("page")) {
            pages.push(self.parse_page(page_node, &fonts)?);
        }

        log::debug!(
            "Parsed {} pages, {} fonts from {}",
            pages.len(),
            fonts.len(),
            self.format
        );

        Ok(SourceDocument {
            metadata,
            config,
            has_config,
            fonts,
            pages,
        })
    }

    /// Parse the document and build merged pages.
    pub fn parse(&self) -> Result<Document> {
        Ok(build_document(self.parse_source()?))
    }

    fn parse_page(&self, node: Node, fonts: &FontTable) -> Result<SourcePage> {
        let number: u32 = required_number(node, "number", Position::default())?;
        let position = Position::page(number);
        let height = required_number(node, "height", position)?;
        let width = required_number(node, "width", position)?;

        let mut page = SourcePage::new(number, height, width);
        for text_node in node.descendants().filter(|n| n.has_tag_name("text")) {
            page.runs.push(self.parse_run(text_node, number, fonts)?);
        }
        Ok(page)
    }

    fn parse_run(&self, node: Node, page: u32, fonts: &FontTable) -> Result<TextRun> {
        let top = node.attribute("top").and_then(|v| v.trim().parse().ok());
        let left = node.attribute("left").and_then(|v| v.trim().parse().ok());
        let position = Position::run(page, top, left);

        let top = required_number(node, "top", position)?;
        let left = required_number(node, "left", position)?;
        let width = required_number(node, "width", position)?;

        let font_id = node.attribute("font").ok_or_else(|| Error::MalformedInput {
            position,
            reason: "text element has no font attribute".to_string(),
        })?;
        let font = fonts.get(font_id).ok_or_else(|| Error::MissingFont {
            font: font_id.to_string(),
            position,
        })?;

        Ok(TextRun::new(
            top,
            left,
            width,
            Arc::clone(font),
            inner_markup(&self.data, node),
        ))
    }
}

fn parse_config(node: Node) -> Result<LayoutConfig> {
    Ok(LayoutConfig {
        top_margin: config_number(node, "top_margin")?,
        bottom_margin: config_number(node, "bottom_margin")?,
        para_break: config_number(node, "para_break")?,
        buf: config_number(node, "buf")?,
        default_font: config_id(node, "default_font"),
        chapter_font: config_id(node, "chapter_font"),
    })
}

fn config_number(node: Node, name: &str) -> Result<i64> {
    match node.attribute(name).map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => value.parse().map_err(|_| {
            Error::Configuration(format!("config {}='{}' is not a number", name, value))
        }),
    }
}

fn config_id(node: Node, name: &str) -> Option<String> {
    node.attribute(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_fontspec(node: Node) -> Result<FontSpec> {
    let id = node
        .attribute("id")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MalformedFontSpec {
            id: None,
            reason: "missing id attribute".to_string(),
        })?;

    let size = node.attribute("size").ok_or_else(|| Error::MalformedFontSpec {
        id: Some(id.to_string()),
        reason: "missing size attribute".to_string(),
    })?;
    let size_pt = size.trim().parse().map_err(|_| Error::MalformedFontSpec {
        id: Some(id.to_string()),
        reason: format!("size '{}' is not a number", size),
    })?;

    Ok(FontSpec::new(
        id,
        size_pt,
        node.attribute("family").unwrap_or_default(),
        node.attribute("color").unwrap_or_default(),
    ))
}

fn required_number<T: FromStr>(node: Node, name: &str, position: Position) -> Result<T> {
    let tag = node.tag_name().name();
    let value = node.attribute(name).ok_or_else(|| Error::MalformedInput {
        position,
        reason: format!("{} element has no {} attribute", tag, name),
    })?;
    value.trim().parse().map_err(|_| Error::MalformedInput {
        position,
        reason: format!("{} {}='{}' is not a number", tag, name, value),
    })
}

/// Text of the first child of the first matching descendant.
fn text_value(root: Node, tag: &str) -> Option<String> {
    root.descendants()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.first_child())
        .and_then(|c| c.text())
        .map(|t| t.trim().to_string())
}

/// Source markup between the start and end tags of an element.
///
/// Inline formatting (`<b>`, `<i>`) and entity escapes are kept as written.
fn inner_markup(source: &str, node: Node) -> String {
    match (node.first_child(), node.last_child()) {
        (Some(first), Some(last)) => source
            .get(first.range().start..last.range().end)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}
