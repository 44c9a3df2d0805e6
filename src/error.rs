use thiserror::Error;

/// Error types for the art2a-rs library
#[derive(Error, Debug)]
pub enum Art2aError {
    /// Input matrix has no rows or no columns
    #[error("empty input matrix")]
    EmptyMatrix,

    /// A row of the input matrix has no components
    #[error("row {row} is empty")]
    EmptyRow {
        /// Index of the offending row
        row: usize,
    },

    /// Rows of the input matrix have inconsistent dimensionality
    #[error("ragged matrix: row {row} has {found} components, expected {expected}")]
    RaggedRow {
        /// Index of the offending row
        row: usize,
        /// Dimensionality of the first row
        expected: usize,
        /// Dimensionality of the offending row
        found: usize,
    },

    /// Fewer rows than the minimum the clustering kernel accepts
    #[error("at least 2 rows are required, found {found}")]
    TooFewRows {
        /// Number of rows in the input
        found: usize,
    },

    /// A scalar parameter is outside its valid range
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Human-readable explanation
        message: String,
    },

    /// Cluster index out of range on a result query
    #[error("cluster index {index} out of range (cluster count {count})")]
    InvalidCluster {
        /// Requested cluster index
        index: usize,
        /// Number of clusters in the result
        count: usize,
    },

    /// Representative queried for a cluster that ended the run without members
    #[error("cluster {index} has no members")]
    EmptyCluster {
        /// Index of the empty cluster
        index: usize,
    },

    /// Representative search cannot satisfy the request
    #[error("representative search failed: {0}")]
    RepresentativeSearch(String),

    /// Worker pool construction failed
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Art2aError>;
