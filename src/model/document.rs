//! Document-level types and tree traversal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Item, ItemLabel};
use crate::error::{Error, Result};

/// Index of a node in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// A single node of the document tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Element kind and payload
    #[serde(flatten)]
    pub item: Item,

    /// Children in document order (arena indices)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,

    /// Page provenance recorded by the pipeline (1-indexed).
    ///
    /// `None` means the page is unknown; it is never inferred from
    /// rendered text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl Node {
    /// Create a node with no children and no page provenance.
    pub fn new(item: Item) -> Self {
        Self {
            item,
            children: Vec::new(),
            page: None,
        }
    }

    /// Create a node with page provenance.
    pub fn on_page(item: Item, page: u32) -> Self {
        Self {
            item,
            children: Vec::new(),
            page: Some(page),
        }
    }
}

/// A structured document: an ordered, labeled tree of content nodes.
///
/// The tree is produced by an upstream conversion pipeline and persisted as
/// JSON; docdown treats it as a read-only projection. Nodes live in an arena
/// and reference each other by [`NodeId`], which mirrors the reference-based
/// persisted form and keeps dangling references representable (and therefore
/// checkable by [`Document::validate`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document name (usually the source file stem)
    pub name: String,

    /// Conversion metadata
    #[serde(default)]
    pub metadata: Metadata,

    /// Node arena
    pub nodes: Vec<Node>,

    /// Root-level nodes in document order
    pub body: Vec<NodeId>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Metadata::default(),
            nodes: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Add a node to the arena, returning its id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Add a root-level item, returning its id.
    pub fn add_to_body(&mut self, item: Item) -> NodeId {
        let id = self.add_node(Node::new(item));
        self.body.push(id);
        id
    }

    /// Add an item as the last child of `parent`, returning its id.
    pub fn add_child(&mut self, parent: NodeId, item: Item) -> NodeId {
        let id = self.add_node(Node::new(item));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document has any body content.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Resolve a caption reference to its text.
    ///
    /// Returns `None` if the id is out of bounds or does not point at a
    /// caption node.
    pub fn caption_text(&self, id: NodeId) -> Option<&str> {
        match self.node(id)?.item {
            Item::Caption { ref text } => Some(text),
            _ => None,
        }
    }

    /// Iterate the tree depth-first in pre-order.
    ///
    /// Yields every node with its traversal level (root-level nodes are at
    /// level 0). With `page` set, nodes whose provenance names a different
    /// page are filtered out; nodes without provenance (groups and other
    /// containers) are always yielded so nesting state stays consistent.
    pub fn iter_items(&self, page: Option<u32>) -> ItemIter<'_> {
        let mut stack: Vec<(NodeId, usize)> = Vec::with_capacity(self.body.len());
        for &id in self.body.iter().rev() {
            stack.push((id, 0));
        }
        ItemIter {
            doc: self,
            stack,
            page,
        }
    }

    /// Count nodes per label across the whole arena.
    pub fn label_counts(&self) -> HashMap<ItemLabel, usize> {
        let mut counts = HashMap::new();
        for node in &self.nodes {
            *counts.entry(node.item.label()).or_insert(0) += 1;
        }
        counts
    }

    /// Check structural well-formedness of the tree.
    ///
    /// Verifies that every body/child/caption reference is in bounds, that
    /// no node is reachable through more than one parent, that caption
    /// references resolve to caption nodes, and that section headers carry
    /// a level of at least 1. These are the fatal malformations: exporting
    /// an invalid tree is refused up front with no partial output.
    pub fn validate(&self) -> Result<()> {
        let bound = self.nodes.len();
        let mut referenced = vec![false; bound];

        let mut claim = |id: NodeId, context: &str| -> Result<()> {
            if id.0 >= bound {
                return Err(Error::Structure(format!(
                    "{} references node {} but the document has {} nodes",
                    context, id.0, bound
                )));
            }
            if referenced[id.0] {
                return Err(Error::Structure(format!(
                    "node {} is reachable through more than one parent",
                    id.0
                )));
            }
            referenced[id.0] = true;
            Ok(())
        };

        for &id in &self.body {
            claim(id, "body")?;
        }
        for (ix, node) in self.nodes.iter().enumerate() {
            for &child in &node.children {
                claim(child, &format!("node {}", ix))?;
            }
        }

        for (ix, node) in self.nodes.iter().enumerate() {
            match node.item {
                Item::Table { caption, .. } | Item::Picture { caption, .. } => {
                    if let Some(cap) = caption {
                        if self.caption_text(cap).is_none() {
                            return Err(Error::CaptionMissing(format!(
                                "node {} references {:?}",
                                ix, cap
                            )));
                        }
                    }
                }
                Item::SectionHeader { level, .. } => {
                    if level == 0 {
                        return Err(Error::Structure(format!(
                            "section header at node {} has level 0",
                            ix
                        )));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// A visited node during traversal.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// Arena id of the node
    pub id: NodeId,
    /// The node itself
    pub node: &'a Node,
    /// Traversal level (0 for root-level nodes)
    pub level: usize,
}

/// Pre-order depth-first iterator over a document tree.
pub struct ItemIter<'a> {
    doc: &'a Document,
    stack: Vec<(NodeId, usize)>,
    page: Option<u32>,
}

impl<'a> Iterator for ItemIter<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Visit<'a>> {
        while let Some((id, level)) = self.stack.pop() {
            let node = self.doc.node(id)?;
            for &child in node.children.iter().rev() {
                self.stack.push((child, level + 1));
            }
            if let (Some(scope), Some(page)) = (self.page, node.page) {
                if page != scope {
                    continue;
                }
            }
            return Some(Visit { id, node, level });
        }
        None
    }
}

/// Conversion metadata persisted alongside the tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Source filename the tree was converted from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// MIME type of the source document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,

    /// When the conversion pipeline produced the tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_at: Option<DateTime<Utc>>,

    /// Total number of source pages, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

impl Metadata {
    /// Convert metadata to YAML frontmatter.
    pub fn to_yaml_frontmatter(&self, name: &str) -> String {
        let mut lines = vec!["---".to_string()];

        lines.push(format!("title: \"{}\"", escape_yaml(name)));
        if let Some(ref origin) = self.origin {
            lines.push(format!("source: \"{}\"", escape_yaml(origin)));
        }
        if let Some(ref mimetype) = self.mimetype {
            lines.push(format!("mimetype: \"{}\"", escape_yaml(mimetype)));
        }
        if let Some(ref converted_at) = self.converted_at {
            lines.push(format!("converted: {}", converted_at.to_rfc3339()));
        }
        if let Some(page_count) = self.page_count {
            lines.push(format!("pages: {}", page_count));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GroupKind;

    #[test]
    fn test_document_new() {
        let doc = Document::new("empty");
        assert!(doc.is_empty());
        assert_eq!(doc.node_count(), 0);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_preorder_traversal() {
        let mut doc = Document::new("lists");
        doc.add_to_body(Item::Title {
            text: "T".to_string(),
        });
        let group = doc.add_to_body(Item::Group {
            kind: GroupKind::List,
        });
        doc.add_child(group, Item::list_item("a"));
        doc.add_child(group, Item::list_item("b"));

        let labels: Vec<ItemLabel> = doc
            .iter_items(None)
            .map(|visit| visit.node.item.label())
            .collect();
        assert_eq!(
            labels,
            vec![
                ItemLabel::Title,
                ItemLabel::Group,
                ItemLabel::ListItem,
                ItemLabel::ListItem
            ]
        );

        let levels: Vec<usize> = doc.iter_items(None).map(|visit| visit.level).collect();
        assert_eq!(levels, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_page_scoped_traversal() {
        let mut doc = Document::new("paged");
        let a = doc.add_node(Node::on_page(
            Item::Paragraph {
                text: "page one".to_string(),
            },
            1,
        ));
        doc.body.push(a);
        let b = doc.add_node(Node::on_page(
            Item::Paragraph {
                text: "page two".to_string(),
            },
            2,
        ));
        doc.body.push(b);
        // a group without provenance is always traversed
        doc.add_to_body(Item::Group {
            kind: GroupKind::Other,
        });

        let visited: Vec<&str> = doc
            .iter_items(Some(2))
            .filter_map(|visit| visit.node.item.text())
            .collect();
        assert_eq!(visited, vec!["page two"]);
        assert_eq!(doc.iter_items(Some(2)).count(), 2);
    }

    #[test]
    fn test_validate_rejects_shared_node() {
        let mut doc = Document::new("shared");
        let id = doc.add_to_body(Item::Paragraph {
            text: "once".to_string(),
        });
        doc.body.push(id);

        let err = doc.validate().unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_validate_rejects_dangling_caption() {
        let mut doc = Document::new("dangling");
        doc.add_to_body(Item::Table {
            caption: Some(NodeId(42)),
            markdown: "| a |\n| --- |".to_string(),
        });

        let err = doc.validate().unwrap_err();
        assert!(matches!(err, Error::CaptionMissing(_)));
    }

    #[test]
    fn test_caption_text_requires_caption_node() {
        let mut doc = Document::new("captions");
        let cap = doc.add_to_body(Item::Caption {
            text: "Figure 1".to_string(),
        });
        let para = doc.add_to_body(Item::Paragraph {
            text: "not a caption".to_string(),
        });

        assert_eq!(doc.caption_text(cap), Some("Figure 1"));
        assert_eq!(doc.caption_text(para), None);
    }

    #[test]
    fn test_metadata_frontmatter() {
        let mut metadata = Metadata::default();
        metadata.origin = Some("report.pdf".to_string());
        metadata.page_count = Some(12);

        let yaml = metadata.to_yaml_frontmatter("report");
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("title: \"report\""));
        assert!(yaml.contains("source: \"report.pdf\""));
        assert!(yaml.contains("pages: 12"));
    }
}
