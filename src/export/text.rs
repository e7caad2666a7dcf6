//! Plain text export for document trees.

use crate::error::Result;
use crate::model::Document;

use super::markdown::MarkdownExporter;
use super::options::ExportOptions;

/// Convert a document tree to plain text.
///
/// Runs the Markdown exporter in strict-text mode: heading markers and
/// list markers are suppressed, tables and pictures are dropped.
pub fn to_text(doc: &Document, options: &ExportOptions) -> Result<String> {
    let options = options.clone().with_strict_text(true);
    MarkdownExporter::new(options).export(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    #[test]
    fn test_to_text() {
        let mut doc = Document::new("doc");
        doc.add_to_body(Item::Title {
            text: "Heading".to_string(),
        });
        doc.add_to_body(Item::Paragraph {
            text: "Body text.".to_string(),
        });

        let result = to_text(&doc, &ExportOptions::default()).unwrap();
        assert_eq!(result, "Heading\n\nBody text.");
    }

    #[test]
    fn test_to_text_drops_tables() {
        let mut doc = Document::new("doc");
        doc.add_to_body(Item::Table {
            caption: None,
            markdown: "| a |\n| --- |".to_string(),
        });
        doc.add_to_body(Item::Paragraph {
            text: "after".to_string(),
        });

        let result = to_text(&doc, &ExportOptions::default()).unwrap();
        assert_eq!(result, "after");
    }
}
