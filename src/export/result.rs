//! Export result with metadata and statistics.

use serde::{Deserialize, Serialize};

use crate::model::Metadata;

/// Result of exporting a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    /// The exported content
    pub content: String,

    /// Document metadata (copied from the source document)
    pub metadata: Metadata,

    /// Export statistics
    pub stats: ExportStats,
}

impl ExportResult {
    /// Create a new export result.
    pub fn new(content: String, metadata: Metadata, stats: ExportStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Check if any degraded renders occurred during the export.
    pub fn is_degraded(&self) -> bool {
        self.stats.degraded_count > 0
    }
}

/// Statistics collected while exporting a document tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportStats {
    /// Headings rendered (title + section headers)
    pub heading_count: u32,

    /// Passthrough text fragments rendered
    pub paragraph_count: u32,

    /// List items rendered
    pub list_item_count: u32,

    /// Code blocks rendered
    pub code_count: u32,

    /// Tables rendered
    pub table_count: u32,

    /// Pictures rendered
    pub picture_count: u32,

    /// Degraded renders: unrecognized labels and pictures without an
    /// image reference in embedded mode
    pub degraded_count: u32,

    /// Approximate word count of the final output
    pub word_count: u32,

    /// Character count of the final output (excluding whitespace)
    pub char_count: u32,
}

impl ExportStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment code block count.
    pub fn add_code(&mut self) {
        self.code_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment picture count.
    pub fn add_picture(&mut self) {
        self.picture_count += 1;
    }

    /// Increment degraded render count.
    pub fn add_degraded(&mut self) {
        self.degraded_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_text() {
        let mut stats = ExportStats::new();
        stats.count_text("one two three");
        assert_eq!(stats.word_count, 3);
        assert_eq!(stats.char_count, 11);
    }

    #[test]
    fn test_is_degraded() {
        let mut stats = ExportStats::new();
        let result = ExportResult::new("x".to_string(), Metadata::default(), stats.clone());
        assert!(!result.is_degraded());

        stats.add_degraded();
        let result = ExportResult::new("x".to_string(), Metadata::default(), stats);
        assert!(result.is_degraded());
    }
}
