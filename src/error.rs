use thiserror::Error;

/// errors raised while loading instances, running the heuristics or exporting results
#[derive(Error, Debug)]
pub enum ColoringError {
    /// an edge endpoint lies outside of [0, n)
    #[error("invalid edge {u} - {v} (graph has {n} vertices)")]
    InvalidEdge {
        /// first endpoint
        u: i64,
        /// second endpoint
        v: i64,
        /// number of vertices
        n: usize,
    },

    /// the instance file cannot be read
    #[error("unable to read instance file {path}: {source}")]
    FileUnreadable {
        /// instance path
        path: String,
        /// underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// the instance header (vertex count, edge count) cannot be parsed
    #[error("malformed instance: {0}")]
    MalformedInstance(String),

    /// the restricted candidate list is empty while vertices remain to be colored
    #[error("internal error: empty candidate list with {remaining} vertices left to color")]
    EmptyCandidateList {
        /// number of uncolored vertices
        remaining: usize,
    },

    /// a search parameter is out of its domain
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O errors (result files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV log errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// statistics serialization errors
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ColoringError {
    /// creates a parameter error
    pub fn parameter(message: impl Into<String>) -> Self {
        ColoringError::InvalidParameter(message.into())
    }
}
