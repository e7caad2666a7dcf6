//! # docdown
//!
//! Render structured document trees to Markdown, plain text, and JSON.
//!
//! An upstream conversion pipeline turns PDFs into labeled document trees
//! (titles, section headers, paragraphs, lists, tables, pictures) and
//! persists them as JSON. This library reads those trees back and
//! re-renders them, preserving document structure: heading depth, list
//! nesting, captions inlined with their tables and pictures.
//!
//! ## Quick Start
//!
//! ```
//! use docdown::export::{to_markdown, ExportOptions};
//! use docdown::model::{Document, GroupKind, Item};
//!
//! let mut doc = Document::new("report");
//! doc.add_to_body(Item::Title { text: "Report".to_string() });
//! let list = doc.add_to_body(Item::Group { kind: GroupKind::List });
//! doc.add_child(list, Item::list_item("first"));
//! doc.add_child(list, Item::list_item("second"));
//!
//! let markdown = to_markdown(&doc, &ExportOptions::default()).unwrap();
//! assert_eq!(markdown, "# Report\n\n- first\n- second");
//! ```
//!
//! ## Features
//!
//! - **Multiple output formats**: Markdown, plain text, JSON
//! - **Structure preservation**: headings, nested lists, tables, pictures
//! - **Range and page scoping**: export a slice of the document
//! - **Post-process hook**: rewrite fragments during export
//! - **Graceful degradation**: unknown labels and missing images render
//!   placeholders instead of aborting

pub mod error;
pub mod export;
pub mod load;
pub mod model;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{
    ExportOptions, ExportResult, ExportStats, Identity, ImageMode, JsonFormat, MarkdownExporter,
    PostProcess,
};
pub use model::{Document, GroupKind, ImageRef, Item, ItemLabel, Metadata, Node, NodeId};

use std::path::Path;

/// Render a persisted document tree to Markdown with default options.
///
/// # Example
///
/// ```no_run
/// let markdown = docdown::to_markdown("report/document.json").unwrap();
/// std::fs::write("report.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load::from_file(path)?;
    export::to_markdown(&doc, &ExportOptions::default())
}

/// Render a persisted document tree to Markdown with custom options.
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &ExportOptions,
) -> Result<String> {
    let doc = load::from_file(path)?;
    export::to_markdown(&doc, options)
}

/// Render a persisted document tree to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &ExportOptions) -> Result<String> {
    let doc = load::from_file(path)?;
    export::to_text(&doc, options)
}

/// Re-serialize a persisted document tree to (validated) JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = load::from_file(path)?;
    export::to_json(&doc, format)
}

/// Builder for loading and exporting document trees.
///
/// # Example
///
/// ```no_run
/// use docdown::{Docdown, ImageMode};
///
/// let markdown = Docdown::new()
///     .with_image_mode(ImageMode::Embedded)
///     .with_frontmatter()
///     .load("report/document.json")?
///     .to_markdown()?;
/// # Ok::<(), docdown::Error>(())
/// ```
pub struct Docdown {
    options: ExportOptions,
}

impl Docdown {
    /// Create a new builder with default export options.
    pub fn new() -> Self {
        Self {
            options: ExportOptions::default(),
        }
    }

    /// Enable strict-text mode.
    pub fn strict(mut self) -> Self {
        self.options = self.options.with_strict_text(true);
        self
    }

    /// Set the picture rendering mode.
    pub fn with_image_mode(mut self, mode: ImageMode) -> Self {
        self.options = self.options.with_image_mode(mode);
        self
    }

    /// Set the picture placeholder token.
    pub fn with_image_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.options = self.options.with_image_placeholder(placeholder);
        self
    }

    /// Restrict the export to a single page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.options = self.options.with_page(page);
        self
    }

    /// Set the half-open sequential index range `[from, to)`.
    pub fn with_element_range(mut self, from: usize, to: usize) -> Self {
        self.options = self.options.with_element_range(from, to);
        self
    }

    /// Set the indentation width for nested lists.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.options = self.options.with_indent(indent);
        self
    }

    /// Enable YAML frontmatter on the output.
    pub fn with_frontmatter(mut self) -> Self {
        self.options = self.options.with_frontmatter(true);
        self
    }

    /// Load a persisted document tree and return a result wrapper.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<DocdownResult> {
        let document = load::from_file(path)?;
        Ok(DocdownResult {
            document,
            options: self.options,
        })
    }

    /// Load a document tree from a JSON string.
    pub fn from_json(self, data: &str) -> Result<DocdownResult> {
        let document = load::from_str(data)?;
        Ok(DocdownResult {
            document,
            options: self.options,
        })
    }
}

impl Default for Docdown {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document tree plus the export options to use.
pub struct DocdownResult {
    /// The loaded document
    pub document: Document,
    options: ExportOptions,
}

impl DocdownResult {
    /// Export to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        export::to_markdown(&self.document, &self.options)
    }

    /// Export to Markdown through a post-process hook.
    pub fn to_markdown_with(&self, hook: &mut dyn PostProcess) -> Result<String> {
        export::to_markdown_with(&self.document, &self.options, hook)
    }

    /// Export to Markdown with statistics.
    pub fn to_markdown_with_stats(&self) -> Result<ExportResult> {
        export::to_markdown_with_stats(&self.document, &self.options)
    }

    /// Export to plain text.
    pub fn to_text(&self) -> Result<String> {
        export::to_text(&self.document, &self.options)
    }

    /// Re-serialize to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        export::to_json(&self.document, format)
    }

    /// Get the loaded document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
