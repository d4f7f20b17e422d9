use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("edge list contains no edges")]
    EmptyEdgeList,

    #[error("index ({row}, {col}) out of range for a {n}x{n} matrix")]
    IndexOutOfRange { row: i64, col: i64, n: usize },
}

pub type Result<T> = std::result::Result<T, GraphError>;
