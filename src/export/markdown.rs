//! Markdown export for document trees.
//!
//! The exporter walks the tree once, depth-first in pre-order, rendering a
//! text fragment per node. Formatting depends on accumulated traversal
//! state: list indentation follows the [`NestingTracker`], heading depth
//! follows the node payload, and fragment boundaries close lists before
//! prose resumes. Fragments are joined and normalized by
//! [`assemble`](super::assemble::assemble) at the end of the single pass.

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Document, Item, Node, NodeId};

use super::assemble::assemble;
use super::nesting::NestingTracker;
use super::options::{ExportOptions, ImageMode, MISSING_IMAGE_PLACEHOLDER, MISSING_TEXT_PLACEHOLDER};
use super::postprocess::{Identity, PostProcess};
use super::result::{ExportResult, ExportStats};

/// Convert a document tree to Markdown.
pub fn to_markdown(doc: &Document, options: &ExportOptions) -> Result<String> {
    MarkdownExporter::new(options.clone()).export(doc)
}

/// Convert a document tree to Markdown with a post-process hook.
///
/// The hook is invoked once per non-empty fragment, in traversal order,
/// after range filtering and before assembly.
pub fn to_markdown_with(
    doc: &Document,
    options: &ExportOptions,
    hook: &mut dyn PostProcess,
) -> Result<String> {
    MarkdownExporter::new(options.clone()).export_with(doc, hook)
}

/// Convert a document tree to Markdown with export statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &ExportOptions) -> Result<ExportResult> {
    MarkdownExporter::new(options.clone()).export_with_stats(doc)
}

/// Markdown exporter.
pub struct MarkdownExporter {
    options: ExportOptions,
    stats: ExportStats,
}

impl MarkdownExporter {
    /// Create a new exporter.
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            stats: ExportStats::new(),
        }
    }

    /// Export a document to Markdown.
    pub fn export(mut self, doc: &Document) -> Result<String> {
        let mut hook = Identity;
        self.export_internal(doc, &mut hook)
    }

    /// Export a document to Markdown through a post-process hook.
    pub fn export_with(mut self, doc: &Document, hook: &mut dyn PostProcess) -> Result<String> {
        self.export_internal(doc, hook)
    }

    /// Export a document to Markdown, returning content plus statistics.
    pub fn export_with_stats(mut self, doc: &Document) -> Result<ExportResult> {
        let mut hook = Identity;
        let content = self.export_internal(doc, &mut hook)?;
        self.stats.count_text(&content);
        Ok(ExportResult::new(
            content,
            doc.metadata.clone(),
            self.stats,
        ))
    }

    fn export_internal(&mut self, doc: &Document, hook: &mut dyn PostProcess) -> Result<String> {
        doc.validate()?;
        self.options.validate(doc)?;
        debug!("exporting '{}' ({} nodes)", doc.name, doc.node_count());

        let mut fragments: Vec<String> = Vec::new();
        let mut tracker = NestingTracker::new();

        for (ix, visit) in doc.iter_items(self.options.page_no).enumerate() {
            tracker.advance(visit.level);

            // Range filter: skipped indices never render, never change the
            // list nesting counter, and never reach the hook. The level
            // bookkeeping above still observes them so indentation stays
            // correct when the range starts mid-list.
            if ix < self.options.from_element || self.options.to_element <= ix {
                continue;
            }

            self.render_item(doc, visit.node, ix, &mut tracker, &mut fragments, hook)?;
        }

        let mut output = assemble(&fragments, &self.options.delimiter);
        if self.options.include_frontmatter {
            output = format!(
                "{}{}",
                doc.metadata.to_yaml_frontmatter(&doc.name),
                output
            );
        }
        debug!("exported '{}' ({} fragments)", doc.name, fragments.len());
        Ok(output)
    }

    fn render_item(
        &mut self,
        doc: &Document,
        node: &Node,
        ix: usize,
        tracker: &mut NestingTracker,
        fragments: &mut Vec<String>,
        hook: &mut dyn PostProcess,
    ) -> Result<()> {
        let strict = self.options.strict_text;

        // Close an open list before any non-list content: Markdown parsers
        // need a blank line to treat the list as finished.
        if !node.item.is_list_item() && !matches!(node.item, Item::Group { .. })
            && tracker.leave_non_list()
        {
            if let Some(last) = fragments.last_mut() {
                last.push('\n');
            }
        }

        match &node.item {
            Item::Group { kind } if kind.is_list() => {
                if tracker.depth() == 0 {
                    // top-level list directly after other content
                    fragments.push("\n".to_string());
                }
                tracker.enter_list();
            }

            Item::Group { .. } => {}

            Item::Title { text } => {
                self.stats.add_heading();
                let marker = if strict { "" } else { "#" };
                let line = format!("{} {}", marker, text).trim().to_string() + "\n";
                push_fragment(fragments, hook, line, node, ix);
            }

            Item::SectionHeader { text, level } => {
                self.stats.add_heading();
                let marker = if strict {
                    String::new()
                } else {
                    "#".repeat((*level as usize).max(2))
                };
                let line = format!("{} {}", marker, text).trim().to_string() + "\n";
                push_fragment(fragments, hook, line, node, ix);
            }

            Item::Code { text } => {
                self.stats.add_code();
                push_fragment(fragments, hook, format!("```\n{}\n```\n", text), node, ix);
            }

            // captions render only inline with their owning table/picture
            Item::Caption { .. } => {}

            Item::ListItem {
                text,
                enumerated,
                marker,
            } => {
                self.stats.add_list_item();
                tracker.mark_in_list();
                let indent = " ".repeat(self.options.indent * tracker.indent_level());
                let marker = if strict {
                    ""
                } else if *enumerated {
                    marker.as_str()
                } else {
                    "-"
                };
                push_fragment(
                    fragments,
                    hook,
                    format!("{}{} {}", indent, marker, text),
                    node,
                    ix,
                );
            }

            item if item.is_passthrough_text() => {
                if !self.options.labels.contains(&item.label()) {
                    return Ok(());
                }
                let text = item.text().unwrap_or_default();
                if text.is_empty() {
                    return Ok(());
                }
                self.stats.add_paragraph();
                let line = if self.options.text_width > 0 {
                    textwrap::fill(text, self.options.text_width) + "\n"
                } else {
                    format!("{}\n", text)
                };
                push_fragment(fragments, hook, line, node, ix);
            }

            Item::Table { caption, markdown } if !strict => {
                self.stats.add_table();
                let caption = resolve_caption(doc, caption)?;
                push_fragment(fragments, hook, caption, node, ix);
                push_fragment(fragments, hook, format!("\n{}\n", markdown), node, ix);
            }

            Item::Picture { caption, image } if !strict => {
                self.stats.add_picture();
                let caption = resolve_caption(doc, caption)?;
                push_fragment(fragments, hook, caption, node, ix);

                match (self.options.image_mode, image) {
                    (ImageMode::Placeholder, _) => {
                        push_fragment(
                            fragments,
                            hook,
                            format!("\n{}\n", self.options.image_placeholder),
                            node,
                            ix,
                        );
                    }
                    (ImageMode::Embedded, Some(image)) => {
                        push_fragment(
                            fragments,
                            hook,
                            format!("![Image]({})\n", image.uri),
                            node,
                            ix,
                        );
                    }
                    (ImageMode::Embedded, None) => {
                        warn!(
                            "picture at index {} has no image reference; \
                             emitting diagnostic fragment",
                            ix
                        );
                        self.stats.add_degraded();
                        push_fragment(
                            fragments,
                            hook,
                            MISSING_IMAGE_PLACEHOLDER.to_string(),
                            node,
                            ix,
                        );
                    }
                }
            }

            // tables and pictures are suppressed in strict-text mode
            Item::Table { .. } | Item::Picture { .. } => {}

            Item::Unknown => {
                warn!("unrecognized item label at index {}; emitting placeholder", ix);
                self.stats.add_degraded();
                push_fragment(
                    fragments,
                    hook,
                    MISSING_TEXT_PLACEHOLDER.to_string(),
                    node,
                    ix,
                );
            }

            // passthrough labels outside the whitelist were handled above;
            // the guard arm keeps the match exhaustive
            _ => {}
        }

        Ok(())
    }
}

/// Append a fragment, running the hook for non-empty text.
///
/// Empty fragments (a table or picture without a caption) are still
/// appended so delimiter placement stays aligned with the element
/// sequence.
fn push_fragment(
    fragments: &mut Vec<String>,
    hook: &mut dyn PostProcess,
    text: String,
    node: &Node,
    ix: usize,
) {
    let text = if text.is_empty() {
        text
    } else {
        hook.apply(&text, node, ix)
    };
    fragments.push(text);
}

fn resolve_caption(doc: &Document, caption: &Option<NodeId>) -> Result<String> {
    match caption {
        Some(id) => doc
            .caption_text(*id)
            .map(str::to_string)
            .ok_or_else(|| Error::CaptionMissing(format!("node {}", id.0))),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupKind, ImageRef};

    fn paragraph_doc(text: &str) -> Document {
        let mut doc = Document::new("doc");
        doc.add_to_body(Item::Paragraph {
            text: text.to_string(),
        });
        doc
    }

    #[test]
    fn test_render_simple_paragraph() {
        let doc = paragraph_doc("Hello, world!");
        let result = to_markdown(&doc, &ExportOptions::default()).unwrap();
        assert_eq!(result, "Hello, world!");
    }

    #[test]
    fn test_render_title() {
        let mut doc = Document::new("doc");
        doc.add_to_body(Item::Title {
            text: "Chapter 1".to_string(),
        });
        let result = to_markdown(&doc, &ExportOptions::default()).unwrap();
        assert_eq!(result, "# Chapter 1");
    }

    #[test]
    fn test_strict_text_drops_markers() {
        let mut doc = Document::new("doc");
        doc.add_to_body(Item::Title {
            text: "Chapter 1".to_string(),
        });
        let group = doc.add_to_body(Item::Group {
            kind: GroupKind::OrderedList,
        });
        doc.add_child(group, Item::enumerated_item("first", "1."));

        let options = ExportOptions::new().with_strict_text(true);
        let result = to_markdown(&doc, &options).unwrap();
        assert_eq!(result, "Chapter 1\n\n first");
    }

    #[test]
    fn test_unknown_label_renders_placeholder() {
        let mut doc = Document::new("doc");
        doc.add_to_body(Item::Paragraph {
            text: "before".to_string(),
        });
        doc.add_to_body(Item::Unknown);
        doc.add_to_body(Item::Paragraph {
            text: "after".to_string(),
        });

        let result = to_markdown_with_stats(&doc, &ExportOptions::default()).unwrap();
        assert!(result.content.contains("before"));
        assert!(result.content.contains(MISSING_TEXT_PLACEHOLDER));
        assert!(result.content.contains("after"));
        assert_eq!(result.stats.degraded_count, 1);
    }

    #[test]
    fn test_embedded_image() {
        let mut doc = Document::new("doc");
        doc.add_to_body(Item::Picture {
            caption: None,
            image: Some(ImageRef::new("images/figure-1.png")),
        });

        let options = ExportOptions::new().with_image_mode(ImageMode::Embedded);
        let result = to_markdown(&doc, &options).unwrap();
        assert_eq!(result, "![Image](images/figure-1.png)");
    }

    #[test]
    fn test_furniture_filtered_by_default() {
        let mut doc = Document::new("doc");
        doc.add_to_body(Item::PageHeader {
            text: "Running Header".to_string(),
        });
        doc.add_to_body(Item::Paragraph {
            text: "body".to_string(),
        });

        let result = to_markdown(&doc, &ExportOptions::default()).unwrap();
        assert_eq!(result, "body");
    }

    #[test]
    fn test_empty_text_emits_nothing() {
        let mut doc = Document::new("doc");
        doc.add_to_body(Item::Paragraph {
            text: String::new(),
        });
        doc.add_to_body(Item::Paragraph {
            text: "kept".to_string(),
        });

        let result = to_markdown(&doc, &ExportOptions::default()).unwrap();
        assert_eq!(result, "kept");
    }

    #[test]
    fn test_custom_delimiter() {
        let mut doc = Document::new("doc");
        doc.add_to_body(Item::Paragraph {
            text: "a".to_string(),
        });
        doc.add_to_body(Item::Paragraph {
            text: "b".to_string(),
        });

        let options = ExportOptions::new().with_delimiter("\n\n");
        let result = to_markdown(&doc, &options).unwrap();
        // wider delimiters still collapse to at most one blank line
        assert_eq!(result, "a\n\nb");
    }

    #[test]
    fn test_text_wrapping() {
        let doc = paragraph_doc("one two three four five six seven eight");
        let options = ExportOptions::new().with_text_width(10);
        let result = to_markdown(&doc, &options).unwrap();
        assert!(result.lines().count() > 1);
        assert!(result.lines().all(|line| line.len() <= 10));
    }
}
