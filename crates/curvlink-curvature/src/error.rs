use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurvatureError {
    #[error("graph has no edges to compute curvature on")]
    EmptyGraph,

    #[error("edge ({u}, {v}) has zero weight")]
    ZeroWeight { u: i64, v: i64 },

    #[error("nodes {u} and {v} are at zero distance")]
    ZeroDistance { u: i64, v: i64 },

    #[error("optimal transport did not converge after {iterations} augmentations")]
    TransportDidNotConverge { iterations: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("thread pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, CurvatureError>;
