//! Error type for dataset preparation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Graph(#[from] curvlink_graph::GraphError),

    #[error(transparent)]
    Curvature(#[from] curvlink_curvature::CurvatureError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("sampled network is empty: network_ratio {ratio} of {total} edges keeps none")]
    EmptySample { ratio: f64, total: usize },

    #[error("requested {requested} negative examples but only {available} non-edges exist")]
    InsufficientNegatives { requested: usize, available: usize },

    #[error("no curvature for adjacency edge ({u}, {v})")]
    MissingCurvature { u: i64, v: i64 },

    #[error("thread pool: {0}")]
    ThreadPool(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
