//! Error types for route-table loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or querying the route table.
#[derive(Error, Debug)]
pub enum RouteError {
    /// The table file could not be opened.
    #[error("Failed to read route table {path}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A row (or the header) failed to parse.
    #[error("Invalid route table row {row}: {source}")]
    Csv {
        /// 1-based data row number, header excluded
        row: usize,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// The table parsed but holds no routes.
    #[error("Route table is empty")]
    Empty,

    /// Route index out of range.
    #[error("Route index {index} out of range (table has {len} routes)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of routes
        len: usize,
    },

    /// Unknown extractor name.
    #[error("Unknown extractor: {0} (expected keyword or fuzzy)")]
    UnknownExtractor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouteError::IndexOutOfRange { index: 9, len: 3 };
        assert_eq!(
            err.to_string(),
            "Route index 9 out of range (table has 3 routes)"
        );
        assert_eq!(RouteError::Empty.to_string(), "Route table is empty");
    }
}
