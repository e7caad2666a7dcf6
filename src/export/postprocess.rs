//! Per-fragment post-processing hook.
//!
//! The hook is a caller-supplied transform applied to each non-empty
//! fragment after range filtering and before assembly. It may only rewrite
//! fragment text; it cannot skip, reorder, or duplicate fragments.
//!
//! # Example
//!
//! ```
//! use docdown::export::{to_markdown_with, ExportOptions};
//! use docdown::model::{Document, Item, Node};
//!
//! let mut doc = Document::new("doc");
//! doc.add_to_body(Item::Paragraph { text: "hello".to_string() });
//!
//! let mut tag_index = |text: &str, _node: &Node, index: usize| {
//!     format!("[{}] {}", index, text)
//! };
//! let markdown =
//!     to_markdown_with(&doc, &ExportOptions::default(), &mut tag_index).unwrap();
//! assert_eq!(markdown, "[0] hello");
//! ```

use crate::model::Node;

/// Transform applied to each non-empty fragment before assembly.
///
/// Implemented for any `FnMut(&str, &Node, usize) -> String` closure.
pub trait PostProcess {
    /// Rewrite one fragment.
    ///
    /// `node` is the tree node the fragment was rendered from and `index`
    /// its sequential traversal index.
    fn apply(&mut self, text: &str, node: &Node, index: usize) -> String;
}

impl<F> PostProcess for F
where
    F: FnMut(&str, &Node, usize) -> String,
{
    fn apply(&mut self, text: &str, node: &Node, index: usize) -> String {
        self(text, node, index)
    }
}

/// The default hook: passes fragments through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl PostProcess for Identity {
    fn apply(&mut self, text: &str, _node: &Node, _index: usize) -> String {
        text.to_string()
    }
}
