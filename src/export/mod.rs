//! Export module for rendering document trees to output formats.

mod assemble;
mod json;
mod markdown;
mod nesting;
mod options;
mod postprocess;
mod result;
mod text;

pub use assemble::{assemble, escape_underscores};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with, to_markdown_with_stats, MarkdownExporter};
pub use nesting::NestingTracker;
pub use options::{
    default_export_labels, ExportOptions, ImageMode, MISSING_IMAGE_PLACEHOLDER,
    MISSING_TEXT_PLACEHOLDER,
};
pub use postprocess::{Identity, PostProcess};
pub use result::{ExportResult, ExportStats};
pub use text::to_text;
