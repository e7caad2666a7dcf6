//! Document model types for structured document trees.
//!
//! This module defines the read-only representation of the document tree
//! produced by the upstream conversion pipeline. The exporter walks this
//! tree; it never mutates it.

mod document;
mod item;

pub use document::{Document, ItemIter, Metadata, Node, NodeId, Visit};
pub use item::{GroupKind, ImageRef, Item, ItemLabel};
