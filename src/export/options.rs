//! Export options and configuration.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::{Document, Item, ItemLabel};

/// Placeholder emitted for items whose label is not recognized.
pub const MISSING_TEXT_PLACEHOLDER: &str = "<missing-text>";

/// Diagnostic fragment for pictures without an image reference in
/// embedded mode.
pub const MISSING_IMAGE_PLACEHOLDER: &str =
    "<!-- image not generated by the conversion pipeline -->";

/// Options for exporting a document tree.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Delimiter joined between fragments
    pub delimiter: String,

    /// First sequential index to render (inclusive)
    pub from_element: usize,

    /// Last sequential index to render (exclusive)
    pub to_element: usize,

    /// Labels rendered as passthrough text
    pub labels: HashSet<ItemLabel>,

    /// Suppress heading markers and list markers
    pub strict_text: bool,

    /// Placeholder emitted for pictures in placeholder mode
    pub image_placeholder: String,

    /// How pictures are rendered
    pub image_mode: ImageMode,

    /// Spaces per list nesting level
    pub indent: usize,

    /// Wrap width for passthrough text (0 = no wrapping)
    pub text_width: usize,

    /// Restrict traversal to a single page (1-indexed)
    pub page_no: Option<u32>,

    /// Fail fast when more than this fraction of pictures lack an image
    /// reference in embedded mode. `None` disables the check, so a single
    /// reference-less picture degrades to a diagnostic fragment instead.
    pub missing_image_threshold: Option<f32>,

    /// Prepend YAML frontmatter built from document metadata
    pub include_frontmatter: bool,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fragment delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the half-open sequential index range `[from, to)`.
    pub fn with_element_range(mut self, from: usize, to: usize) -> Self {
        self.from_element = from;
        self.to_element = to;
        self
    }

    /// Set the passthrough label whitelist.
    pub fn with_labels(mut self, labels: HashSet<ItemLabel>) -> Self {
        self.labels = labels;
        self
    }

    /// Enable or disable strict-text mode.
    pub fn with_strict_text(mut self, strict: bool) -> Self {
        self.strict_text = strict;
        self
    }

    /// Set the picture placeholder token.
    pub fn with_image_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.image_placeholder = placeholder.into();
        self
    }

    /// Set the picture rendering mode.
    pub fn with_image_mode(mut self, mode: ImageMode) -> Self {
        self.image_mode = mode;
        self
    }

    /// Set the indentation width for nested lists.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Set the wrap width for passthrough text.
    pub fn with_text_width(mut self, width: usize) -> Self {
        self.text_width = width;
        self
    }

    /// Restrict the export to a single page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page_no = Some(page);
        self
    }

    /// Set the missing-image fail-fast threshold.
    pub fn with_missing_image_threshold(mut self, threshold: f32) -> Self {
        self.missing_image_threshold = Some(threshold);
        self
    }

    /// Enable or disable YAML frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Check the configuration against a document before traversal.
    ///
    /// Configuration errors surface here, before any fragment is produced.
    pub fn validate(&self, doc: &Document) -> Result<()> {
        if self.from_element > self.to_element {
            return Err(Error::InvalidRange(format!(
                "from_element {} > to_element {}",
                self.from_element, self.to_element
            )));
        }

        if let Some(page) = self.page_no {
            if page == 0 {
                return Err(Error::Config("pages are 1-indexed".to_string()));
            }
            if let Some(count) = doc.metadata.page_count {
                if page > count {
                    return Err(Error::PageOutOfRange(page, count));
                }
            }
        }

        if self.image_mode == ImageMode::Embedded {
            if let Some(threshold) = self.missing_image_threshold {
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(Error::Config(format!(
                        "missing_image_threshold {} is not in [0, 1]",
                        threshold
                    )));
                }
                let (total, missing) = count_pictures(doc);
                if total > 0 && missing as f32 / total as f32 > threshold {
                    return Err(Error::Config(format!(
                        "{} of {} pictures have no image reference; embedded \
                         image mode is incompatible with this document",
                        missing, total
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: "\n".to_string(),
            from_element: 0,
            to_element: usize::MAX,
            labels: default_export_labels(),
            strict_text: false,
            image_placeholder: "<!-- image -->".to_string(),
            image_mode: ImageMode::Placeholder,
            indent: 4,
            text_width: 0,
            page_no: None,
            missing_image_threshold: None,
            include_frontmatter: false,
        }
    }
}

/// How pictures are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMode {
    /// Emit the configured placeholder token
    #[default]
    Placeholder,
    /// Emit an inline image reference when one exists
    Embedded,
}

/// The default passthrough label set.
///
/// Page furniture (running headers and footers) is excluded; everything
/// else that carries plain text passes through.
pub fn default_export_labels() -> HashSet<ItemLabel> {
    [
        ItemLabel::Paragraph,
        ItemLabel::Text,
        ItemLabel::Formula,
        ItemLabel::Footnote,
        ItemLabel::Reference,
    ]
    .into_iter()
    .collect()
}

fn count_pictures(doc: &Document) -> (usize, usize) {
    let mut total = 0;
    let mut missing = 0;
    for node in &doc.nodes {
        if let Item::Picture { ref image, .. } = node.item {
            total += 1;
            if image.is_none() {
                missing += 1;
            }
        }
    }
    (total, missing)
}
