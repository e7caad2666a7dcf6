//! Loading persisted document trees.
//!
//! The upstream conversion pipeline writes each converted document as a
//! JSON file (`document.json`). This module reads that form back and
//! verifies structural well-formedness before the tree reaches the
//! exporter, so a malformed file fails here with no partial output.

use std::fs;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::model::Document;

/// Load a document tree from a JSON file.
///
/// # Example
///
/// ```no_run
/// let doc = docdown::load::from_file("report/document.json").unwrap();
/// println!("{} nodes", doc.node_count());
/// ```
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let data = fs::read_to_string(path.as_ref())?;
    let doc = from_str(&data)?;
    debug!(
        "loaded '{}' from {} ({} nodes)",
        doc.name,
        path.as_ref().display(),
        doc.node_count()
    );
    Ok(doc)
}

/// Load a document tree from a JSON string.
pub fn from_str(data: &str) -> Result<Document> {
    let doc: Document = serde_json::from_str(data)?;
    doc.validate()?;
    Ok(doc)
}

/// Load a document tree from a reader.
pub fn from_reader<R: Read>(reader: R) -> Result<Document> {
    let doc: Document = serde_json::from_reader(reader)?;
    doc.validate()?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_from_str() {
        let json = r#"{
            "name": "sample",
            "nodes": [
                {"label": "title", "text": "Sample"},
                {"label": "paragraph", "text": "Body."}
            ],
            "body": [0, 1]
        }"#;

        let doc = from_str(json).unwrap();
        assert_eq!(doc.name, "sample");
        assert_eq!(doc.node_count(), 2);
    }

    #[test]
    fn test_from_str_rejects_out_of_bounds_body() {
        let json = r#"{"name": "bad", "nodes": [], "body": [3]}"#;
        let err = from_str(json).unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_from_str_rejects_invalid_json() {
        let err = from_str("not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_reader() {
        let json = r#"{"name": "r", "nodes": [], "body": []}"#;
        let doc = from_reader(json.as_bytes()).unwrap();
        assert!(doc.is_empty());
    }
}
