//! Error types for the lrloc-core library.
//!
//! Scanning and catalog building never fail: malformed call sites are skipped
//! and conflicting entries are annotated. The variants below cover the I/O
//! helpers and the catalog line parser.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lrloc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all lrloc operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read a source document or catalog
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a catalog file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create an output directory
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate {
        /// Path to the directory that failed to create
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No source documents matched under the given root
    #[error("no source documents found under '{path}'")]
    NoDocumentsFound {
        /// Root that was searched
        path: PathBuf,
    },

    /// Documents were scanned but no LOC strings were found
    #[error("no translation strings found")]
    NothingExtracted,

    /// A catalog line is neither a comment, a blank, nor a `"key=value"` entry
    #[error("invalid catalog line {line}: '{content}'")]
    InvalidCatalogLine {
        /// 1-based line number
        line: usize,
        /// The offending line
        content: String,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new directory creation error
    pub fn directory_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new "no documents" error
    pub fn no_documents_found(path: impl Into<PathBuf>) -> Self {
        Self::NoDocumentsFound { path: path.into() }
    }

    /// Creates a new invalid catalog line error
    pub fn invalid_catalog_line(line: usize, content: impl Into<String>) -> Self {
        Self::InvalidCatalogLine {
            line,
            content: content.into(),
        }
    }

    /// Creates a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this error only affects one document or one line
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::FileRead { .. } | Self::InvalidCatalogLine { .. })
    }

    /// Returns true if this is an empty-result condition rather than a failure
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::NoDocumentsFound { .. } | Self::NothingExtracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_catalog_line(7, "garbage");
        assert!(err.to_string().contains("line 7"));
        assert!(err.to_string().contains("garbage"));
    }

    #[test]
    fn test_is_recoverable() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(Error::file_read("/tmp/a.lua", io).is_recoverable());
        assert!(Error::invalid_catalog_line(1, "x").is_recoverable());
        assert!(!Error::internal("test").is_recoverable());
    }

    #[test]
    fn test_is_empty_result() {
        assert!(Error::NothingExtracted.is_empty_result());
        assert!(Error::no_documents_found("/plugin").is_empty_result());
        assert!(!Error::internal("test").is_empty_result());
    }
}
