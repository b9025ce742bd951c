//! Font table types.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, Result};

/// Semantic role of a font, assigned once while the table is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    /// Body text
    Default,
    /// Chapter headings
    Chapter,
    /// Anything else (rendered through a CSS class)
    #[default]
    Other,
}

impl std::fmt::Display for FontRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FontRole::Default => "default",
            FontRole::Chapter => "chapter",
            FontRole::Other => "other",
        };
        f.write_str(name)
    }
}

/// A font specification, e.g. `<fontspec id="0" size="16" family="Times" color="#000000"/>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontSpec {
    /// Font id as written in the source
    pub id: String,
    /// Size in points
    pub size_pt: u32,
    /// Font family
    pub family: String,
    /// Text color
    pub color: String,
    /// Size relative to the body font, in percent
    pub size_pct: u32,
    /// Role of the font in the document
    pub role: FontRole,
}

impl FontSpec {
    /// Create a font spec with no role and 100% relative size.
    pub fn new(
        id: impl Into<String>,
        size_pt: u32,
        family: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            size_pt,
            family: family.into(),
            color: color.into(),
            size_pct: 100,
            role: FontRole::Other,
        }
    }

    /// CSS class name used for runs in this font.
    pub fn css_class(&self) -> String {
        format!("class_{}", self.id)
    }

    /// CSS declarations for this font.
    pub fn css_style(&self) -> String {
        format!(
            "font-family:{};font-size:{}%;color:{};",
            self.family, self.size_pct, self.color
        )
    }

    /// Check if this is the body text font.
    pub fn is_default(&self) -> bool {
        self.role == FontRole::Default
    }

    /// Check if this is the chapter heading font.
    pub fn is_chapter(&self) -> bool {
        self.role == FontRole::Chapter
    }
}

/// All fonts of a document, in source order, with lookup by id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FontTable {
    fonts: Vec<Arc<FontSpec>>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl FontTable {
    /// Build the table, assign roles and compute relative sizes.
    ///
    /// When both roles name the same id, the font is the default font.
    /// Relative sizes are computed against the default font. If no default
    /// font is configured, or the configured id is unknown, the first font's
    /// size is used instead. Unknown role ids are logged and ignored unless
    /// `strict` is set, in which case they are an error.
    pub fn build(
        specs: Vec<FontSpec>,
        default_font: Option<&str>,
        chapter_font: Option<&str>,
        strict: bool,
    ) -> Result<Self> {
        let mut fonts: Vec<FontSpec> = Vec::with_capacity(specs.len());
        let mut index = HashMap::new();

        for spec in specs {
            match index.get(&spec.id) {
                Some(&i) => fonts[i] = spec,
                None => {
                    index.insert(spec.id.clone(), fonts.len());
                    fonts.push(spec);
                }
            }
        }

        for (label, id) in [("default_font", default_font), ("chapter_font", chapter_font)] {
            if let Some(id) = id {
                if !index.contains_key(id) {
                    let message = format!("{} '{}' does not match any fontspec", label, id);
                    if strict {
                        return Err(Error::Configuration(message));
                    }
                    log::warn!("{}; no font gets this role", message);
                }
            }
        }

        let reference_size = default_font
            .and_then(|id| index.get(id))
            .map(|&i| fonts[i].size_pt)
            .or_else(|| fonts.first().map(|f| f.size_pt))
            .unwrap_or(0);

        for font in &mut fonts {
            if Some(font.id.as_str()) == default_font {
                font.role = FontRole::Default;
            } else if Some(font.id.as_str()) == chapter_font {
                font.role = FontRole::Chapter;
            }
            font.size_pct = relative_size(font.size_pt, reference_size);
        }

        log::debug!(
            "Font table: {} fonts, reference size {}pt",
            fonts.len(),
            reference_size
        );

        Ok(Self {
            fonts: fonts.into_iter().map(Arc::new).collect(),
            index,
        })
    }

    /// Look up a font by id.
    pub fn get(&self, id: &str) -> Option<&Arc<FontSpec>> {
        self.index.get(id).map(|&i| &self.fonts[i])
    }

    /// Iterate fonts in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<FontSpec>> {
        self.fonts.iter()
    }

    /// Number of distinct fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Check if the table has no fonts.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// The body text font, if one is configured.
    pub fn default_font(&self) -> Option<&Arc<FontSpec>> {
        self.fonts.iter().find(|f| f.is_default())
    }

    /// The chapter heading font, if one is configured.
    pub fn chapter_font(&self) -> Option<&Arc<FontSpec>> {
        self.fonts.iter().find(|f| f.is_chapter())
    }
}

fn relative_size(size_pt: u32, reference: u32) -> u32 {
    if reference == 0 {
        return 100;
    }
    (size_pt as f64 / reference as f64 * 100.0).round() as u32
}
