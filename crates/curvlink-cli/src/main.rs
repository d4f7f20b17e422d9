//! # curvlink
//!
//! Prepare a curvature-annotated link-prediction dataset from an edge list.
//!
//! ```text
//! curvlink --in-file data/drugbank.txt --feature-type position --batch 512
//! curvlink --in-file data/drugbank.txt --network-ratio 0.5 --export out/drugbank
//! ```
//!
//! Every flag can also be set through its `CURVLINK_*` environment variable.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use curvlink_dataset::{
    load_data, write_dataset, CurvatureKind, DatasetConfig, FeatureType, NegativeSampling,
};

#[derive(Parser, Debug)]
#[command(name = "curvlink")]
#[command(version)]
#[command(about = "Link-prediction dataset preparation with edge curvature")]
struct Cli {
    /// Edge list: one `u v` integer pair per line
    #[arg(long, env = "CURVLINK_IN_FILE", default_value = "data/edges.txt")]
    in_file: PathBuf,

    /// Seed for every stochastic step
    #[arg(long, env = "CURVLINK_SEED", default_value_t = 0)]
    seed: u64,

    /// Fraction of positive edges kept, in (0, 1]
    #[arg(long, env = "CURVLINK_NETWORK_RATIO", default_value_t = 1.0)]
    network_ratio: f64,

    /// Examples per batch
    #[arg(long, env = "CURVLINK_BATCH", default_value_t = 256)]
    batch: usize,

    /// Worker threads for curvature and batch collation (0 = main thread)
    #[arg(long, env = "CURVLINK_WORKERS", default_value_t = 0)]
    workers: usize,

    /// Feature columns for uniform / normal features
    #[arg(long, env = "CURVLINK_DIMENSIONS", default_value_t = 64)]
    dimensions: usize,

    /// one_hot | uniform | normal | position
    #[arg(long, env = "CURVLINK_FEATURE_TYPE", default_value = "one_hot")]
    feature_type: FeatureType,

    #[arg(long, env = "CURVLINK_VAL_RATIO", default_value_t = 0.1)]
    val_ratio: f64,

    #[arg(long, env = "CURVLINK_TEST_RATIO", default_value_t = 0.2)]
    test_ratio: f64,

    /// ollivier | forman
    #[arg(long, env = "CURVLINK_CURVATURE", default_value = "ollivier")]
    curvature: CurvatureKind,

    /// Ollivier-Ricci laziness in [0, 1]
    #[arg(long, env = "CURVLINK_ALPHA", default_value_t = 0.5)]
    alpha: f64,

    /// exhaustive | rejection
    #[arg(long, env = "CURVLINK_NEGATIVE_SAMPLING", default_value = "exhaustive")]
    negative_sampling: NegativeSampling,

    /// Write splits, adjacency and summary.json into this directory
    #[arg(long)]
    export: Option<PathBuf>,

    /// tracing filter, e.g. `info` or `curvlink_curvature=debug`
    #[arg(long, env = "CURVLINK_LOG", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn dataset_config(&self) -> DatasetConfig {
        DatasetConfig {
            in_file:           self.in_file.clone(),
            seed:              self.seed,
            network_ratio:     self.network_ratio,
            batch:             self.batch,
            workers:           self.workers,
            dimensions:        self.dimensions,
            feature_type:      self.feature_type,
            val_ratio:         self.val_ratio,
            test_ratio:        self.test_ratio,
            curvature:         self.curvature,
            alpha:             self.alpha,
            negative_sampling: self.negative_sampling,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .compact()
        .init();

    let config = cli.dataset_config();
    info!(
        version  = env!("CARGO_PKG_VERSION"),
        dataset  = %config.dataset_name(),
        features = %config.feature_type,
        curvature = %config.curvature,
        seed     = config.seed,
        "curvlink starting"
    );

    let prepared = load_data(&config)
        .with_context(|| format!("preparing dataset from {}", config.in_file.display()))?;

    if let Some(dir) = &cli.export {
        write_dataset(dir, &prepared, &config)
            .with_context(|| format!("exporting dataset to {}", dir.display()))?;
    }

    let summary = serde_json::json!({
        "dataset":         config.dataset_name(),
        "num_nodes":       prepared.num_nodes,
        "feature_dim":     prepared.feature_dim,
        "adjacency_edges": prepared.data.num_edges(),
        "positives":       prepared.positives,
        "negatives":       prepared.negatives,
        "train_batches":   prepared.train.num_batches(),
        "val_batches":     prepared.val.num_batches(),
        "test_batches":    prepared.test.num_batches(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
