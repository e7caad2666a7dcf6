//! Error types for the docdown library.

use std::io;
use thiserror::Error;

/// Result type alias for docdown operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or exporting a document tree.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error deserializing or serializing the persisted document tree.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document tree is not well-formed.
    ///
    /// Covers out-of-bounds node references, nodes reachable through more
    /// than one parent, and section headers with an impossible level.
    /// Fatal: no partial output is produced.
    #[error("malformed document tree: {0}")]
    Structure(String),

    /// A table or picture references a caption node that does not resolve.
    #[error("caption reference does not resolve: {0}")]
    CaptionMissing(String),

    /// Invalid element range specification.
    #[error("invalid element range: {0}")]
    InvalidRange(String),

    /// Export configuration incompatible with the document.
    #[error("configuration error: {0}")]
    Config(String),

    /// Page number is out of range.
    #[error("page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Structure("node 7 has two parents".to_string());
        assert_eq!(
            err.to_string(),
            "malformed document tree: node 7 has two parents"
        );

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "page 10 is out of range (document has 5 pages)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
