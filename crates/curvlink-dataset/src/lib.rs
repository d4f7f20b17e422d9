//! # curvlink-dataset
//!
//! Turns a raw edge list into a link-prediction dataset:
//!
//! 1. subsample positive edges (`network_ratio`),
//! 2. compute edge curvature on the sampled graph,
//! 3. draw one negative per positive from the graph's complement,
//! 4. split positives and negatives into train / val / test,
//! 5. build the symmetric training adjacency with per-edge curvature,
//! 6. generate row-normalized node features and batch loaders.
//!
//! Everything stochastic derives from [`DatasetConfig::seed`].
//!
//! ```rust,ignore
//! use curvlink_dataset::{load_data, DatasetConfig};
//!
//! let prepared = load_data(&DatasetConfig::from_env())?;
//! for batch in prepared.train.epoch() { /* ... */ }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod features;
pub mod loader;
pub mod pipeline;
pub mod sampling;
pub mod split;

pub use config::{CurvatureKind, DatasetConfig, FeatureType, NegativeSampling};
pub use error::{DatasetError, Result};
pub use export::write_dataset;
pub use features::{generate_features, row_normalize};
pub use loader::{Batch, DataLoader, ExampleSet, LoaderConfig};
pub use pipeline::{load_data, GraphData, PreparedDataset};
pub use sampling::{sample_negatives, seeded_rng, subsample_positives};
pub use split::{split_examples, split_sizes, Example, Splits};
