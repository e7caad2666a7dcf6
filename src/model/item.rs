//! Document element kinds and payloads.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A document element, tagged by its layout label.
///
/// This is the closed set of element kinds the upstream conversion pipeline
/// emits. Labels outside the set deserialize to [`Item::Unknown`] so that
/// forward-incompatible trees degrade gracefully instead of failing to load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "label", rename_all = "snake_case")]
pub enum Item {
    /// A container node. Only list groups affect nesting state.
    Group {
        /// Group sub-kind
        kind: GroupKind,
    },

    /// The document title.
    Title {
        /// Heading text
        text: String,
    },

    /// A section heading with an explicit depth.
    SectionHeader {
        /// Heading text
        text: String,
        /// Heading depth (1 = outermost section)
        level: u8,
    },

    /// A literal code block.
    Code {
        /// Code text, rendered verbatim
        text: String,
    },

    /// A caption owned by a table or picture.
    ///
    /// Never rendered standalone; the owning element pulls the text in
    /// through its caption reference.
    Caption {
        /// Caption text
        text: String,
    },

    /// An item inside a list group.
    ListItem {
        /// Item text
        text: String,
        /// Whether the item belongs to an enumerated list
        enumerated: bool,
        /// Literal marker for enumerated items (e.g. "1.", "a)")
        #[serde(default)]
        marker: String,
    },

    /// A body paragraph.
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// Free-standing text outside any other category.
    Text {
        /// Text content
        text: String,
    },

    /// A formula, carried as its textual form.
    Formula {
        /// Formula text
        text: String,
    },

    /// A footnote.
    Footnote {
        /// Footnote text
        text: String,
    },

    /// A bibliographic reference entry.
    Reference {
        /// Reference text
        text: String,
    },

    /// Running page header (furniture).
    PageHeader {
        /// Header text
        text: String,
    },

    /// Running page footer (furniture).
    PageFooter {
        /// Footer text
        text: String,
    },

    /// A table with a pre-rendered Markdown body.
    Table {
        /// Reference to the owning caption node, if any
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<NodeId>,
        /// Tabular body, already rendered to Markdown by the pipeline
        markdown: String,
    },

    /// A picture, optionally with an inline image reference.
    Picture {
        /// Reference to the owning caption node, if any
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<NodeId>,
        /// Inline image reference produced by the pipeline, if generated
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<ImageRef>,
    },

    /// Any label outside the known set.
    ///
    /// Renders to a fixed placeholder instead of aborting the export.
    #[serde(other)]
    Unknown,
}

impl Item {
    /// Get the label of this item.
    pub fn label(&self) -> ItemLabel {
        match self {
            Item::Group { .. } => ItemLabel::Group,
            Item::Title { .. } => ItemLabel::Title,
            Item::SectionHeader { .. } => ItemLabel::SectionHeader,
            Item::Code { .. } => ItemLabel::Code,
            Item::Caption { .. } => ItemLabel::Caption,
            Item::ListItem { .. } => ItemLabel::ListItem,
            Item::Paragraph { .. } => ItemLabel::Paragraph,
            Item::Text { .. } => ItemLabel::Text,
            Item::Formula { .. } => ItemLabel::Formula,
            Item::Footnote { .. } => ItemLabel::Footnote,
            Item::Reference { .. } => ItemLabel::Reference,
            Item::PageHeader { .. } => ItemLabel::PageHeader,
            Item::PageFooter { .. } => ItemLabel::PageFooter,
            Item::Table { .. } => ItemLabel::Table,
            Item::Picture { .. } => ItemLabel::Picture,
            Item::Unknown => ItemLabel::Unknown,
        }
    }

    /// Get the text payload, if this item kind carries one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Item::Title { text }
            | Item::SectionHeader { text, .. }
            | Item::Code { text }
            | Item::Caption { text }
            | Item::ListItem { text, .. }
            | Item::Paragraph { text }
            | Item::Text { text }
            | Item::Formula { text }
            | Item::Footnote { text }
            | Item::Reference { text }
            | Item::PageHeader { text }
            | Item::PageFooter { text } => Some(text),
            Item::Group { .. } | Item::Table { .. } | Item::Picture { .. } | Item::Unknown => None,
        }
    }

    /// Check if this is a list group.
    pub fn is_list_group(&self) -> bool {
        matches!(self, Item::Group { kind } if kind.is_list())
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Item::ListItem { .. })
    }

    /// Check if this item kind renders passthrough text.
    pub fn is_passthrough_text(&self) -> bool {
        matches!(
            self,
            Item::Paragraph { .. }
                | Item::Text { .. }
                | Item::Formula { .. }
                | Item::Footnote { .. }
                | Item::Reference { .. }
                | Item::PageHeader { .. }
                | Item::PageFooter { .. }
        )
    }

    /// Create an unordered list item.
    pub fn list_item(text: impl Into<String>) -> Self {
        Item::ListItem {
            text: text.into(),
            enumerated: false,
            marker: String::new(),
        }
    }

    /// Create an enumerated list item with its literal marker.
    pub fn enumerated_item(text: impl Into<String>, marker: impl Into<String>) -> Self {
        Item::ListItem {
            text: text.into(),
            enumerated: true,
            marker: marker.into(),
        }
    }
}

/// Sub-kind of a group node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Unordered list container
    List,
    /// Ordered list container
    OrderedList,
    /// Any other grouping; transparent for nesting purposes
    Other,
}

impl GroupKind {
    /// Check if this group kind opens a list.
    pub fn is_list(&self) -> bool {
        matches!(self, GroupKind::List | GroupKind::OrderedList)
    }
}

/// Label identifying an item kind, used for whitelist configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLabel {
    /// Group container
    Group,
    /// Document title
    Title,
    /// Section heading
    SectionHeader,
    /// Code block
    Code,
    /// Table/picture caption
    Caption,
    /// List item
    ListItem,
    /// Body paragraph
    Paragraph,
    /// Free-standing text
    Text,
    /// Formula
    Formula,
    /// Footnote
    Footnote,
    /// Bibliographic reference
    Reference,
    /// Running page header
    PageHeader,
    /// Running page footer
    PageFooter,
    /// Table
    Table,
    /// Picture
    Picture,
    /// Unrecognized label
    Unknown,
}

impl ItemLabel {
    /// Stable lowercase name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemLabel::Group => "group",
            ItemLabel::Title => "title",
            ItemLabel::SectionHeader => "section_header",
            ItemLabel::Code => "code",
            ItemLabel::Caption => "caption",
            ItemLabel::ListItem => "list_item",
            ItemLabel::Paragraph => "paragraph",
            ItemLabel::Text => "text",
            ItemLabel::Formula => "formula",
            ItemLabel::Footnote => "footnote",
            ItemLabel::Reference => "reference",
            ItemLabel::PageHeader => "page_header",
            ItemLabel::PageFooter => "page_footer",
            ItemLabel::Table => "table",
            ItemLabel::Picture => "picture",
            ItemLabel::Unknown => "unknown",
        }
    }
}

/// Reference to an image generated by the conversion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image URI: a file path or data URI written by the pipeline
    pub uri: String,
}

impl ImageRef {
    /// Create an image reference from a URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_label() {
        let item = Item::Title {
            text: "Report".to_string(),
        };
        assert_eq!(item.label(), ItemLabel::Title);
        assert_eq!(item.text(), Some("Report"));
    }

    #[test]
    fn test_list_group_detection() {
        let list = Item::Group {
            kind: GroupKind::OrderedList,
        };
        assert!(list.is_list_group());

        let other = Item::Group {
            kind: GroupKind::Other,
        };
        assert!(!other.is_list_group());
    }

    #[test]
    fn test_unknown_label_deserializes() {
        let json = r#"{"label": "chart", "series": 3}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert!(matches!(item, Item::Unknown));
    }

    #[test]
    fn test_list_item_constructors() {
        let bullet = Item::list_item("first");
        assert!(bullet.is_list_item());

        let numbered = Item::enumerated_item("second", "2.");
        match numbered {
            Item::ListItem {
                enumerated, marker, ..
            } => {
                assert!(enumerated);
                assert_eq!(marker, "2.");
            }
            _ => panic!("expected list item"),
        }
    }

    #[test]
    fn test_label_roundtrip() {
        let item = Item::SectionHeader {
            text: "Intro".to_string(),
            level: 2,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"label\":\"section_header\""));

        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back.label(), ItemLabel::SectionHeader);
    }
}
