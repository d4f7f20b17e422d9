//! End-to-end dataset preparation.
//!
//! ```text
//! edge list ─► subsample ─► sampled graph (+ self-loops) ─► curvature
//!                  │                 │
//!                  │                 └─► negatives (complement)
//!                  └─► split ─► train positives ─► max(A, Aᵀ) ─► edge_index + curvature
//!                                      │
//!                                      └─► loaders (train / val / test), features
//! ```

use ndarray::{Array1, Array2};

use curvlink_curvature::{forman_curvature, CurvatureMap, OllivierConfig, OllivierRicci};
use curvlink_graph::{connected_components, read_edge_list, CooMatrix, CsrMatrix, Graph};

use crate::config::{CurvatureKind, DatasetConfig};
use crate::error::{DatasetError, Result};
use crate::features::{generate_features, row_normalize};
use crate::loader::{DataLoader, ExampleSet, LoaderConfig};
use crate::sampling::{sample_negatives, subsample_positives};
use crate::split::{split_examples, Splits};

const TRAIN_STREAM: u64 = 1;
const VAL_STREAM: u64 = 2;
const TEST_STREAM: u64 = 3;

/// Graph tensors handed to the model.
#[derive(Debug, Clone)]
pub struct GraphData {
    /// Row-normalized node features, `n × d`.
    pub x: Array2<f32>,
    /// `2 × E` coordinates of the non-zero symmetric training adjacency.
    pub edge_index: Array2<i64>,
    /// One value per `edge_index` column; `1.0` on self-loops.
    pub curvature: Array1<f32>,
}

impl GraphData {
    pub fn num_nodes(&self) -> usize {
        self.x.nrows()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_index.ncols()
    }

    pub fn feature_dim(&self) -> usize {
        self.x.ncols()
    }
}

#[derive(Debug)]
pub struct PreparedDataset {
    pub data: GraphData,
    pub train: DataLoader,
    pub val: DataLoader,
    pub test: DataLoader,
    /// Distinct entities in the full (pre-sampling) edge list.
    pub num_nodes: usize,
    /// Effective feature columns.
    pub feature_dim: usize,
    /// Positive pairs after subsampling.
    pub positives: usize,
    pub negatives: usize,
}

/// Read `config.in_file` and build graph tensors plus train/val/test loaders.
pub fn load_data(config: &DatasetConfig) -> Result<PreparedDataset> {
    config.validate()?;
    let dataset = config.dataset_name();
    tracing::info!(dataset = %dataset, path = %config.in_file.display(), "loading edge list");

    let edges = read_edge_list(&config.in_file)?;
    let num_nodes = Graph::from_edges(&edges).node_count();
    tracing::info!(rows = edges.len(), nodes = num_nodes, "edge list read");

    let positives = subsample_positives(&edges, config.network_ratio, config.seed);
    if positives.is_empty() {
        return Err(DatasetError::EmptySample { ratio: config.network_ratio, total: edges.len() });
    }

    let mut sampled = Graph::from_edges(&positives);
    sampled.add_self_loops();
    let components = connected_components(&sampled);
    tracing::info!(
        nodes = sampled.node_count(),
        edges = sampled.edge_count(),
        components = components.component_count,
        largest = components.largest_component_size,
        "sampled network built"
    );

    let curvature = compute_curvature(&sampled, config)?;

    let negatives = sample_negatives(&sampled, positives.len(), config.seed, config.negative_sampling)?;
    let splits = split_examples(&positives, &negatives, config.val_ratio, config.test_ratio);
    tracing::info!(
        positives = positives.len(),
        negatives = negatives.len(),
        train = splits.train.len(),
        val = splits.val.len(),
        test = splits.test.len(),
        "examples prepared"
    );

    let adjacency = CooMatrix::from_pairs(num_nodes, &splits.train_positive)?.to_csr().symmetrize();
    let (edge_index, edge_curvature) = edge_tensors(&adjacency, &curvature)?;

    let (train, val, test) = build_loaders(splits, config)?;

    tracing::info!(feature_type = %config.feature_type, "Extracting features...");
    let raw = generate_features(config.feature_type, num_nodes, config.dimensions, config.seed, &adjacency);
    let x = row_normalize(raw).mapv(|v| v as f32);
    let feature_dim = x.ncols();

    let data = GraphData { x, edge_index, curvature: edge_curvature };
    tracing::info!(
        nodes = data.num_nodes(),
        adjacency_edges = data.num_edges(),
        feature_dim,
        "Loading finished!"
    );

    Ok(PreparedDataset {
        data,
        train,
        val,
        test,
        num_nodes,
        feature_dim,
        positives: positives.len(),
        negatives: negatives.len(),
    })
}

fn compute_curvature(graph: &Graph, config: &DatasetConfig) -> Result<CurvatureMap> {
    let map = match config.curvature {
        CurvatureKind::Ollivier => {
            let orc_config = OllivierConfig {
                alpha: config.alpha,
                workers: config.workers,
                ..Default::default()
            };
            OllivierRicci::new(graph, orc_config).compute_ricci_curvature()?
        }
        CurvatureKind::Forman => forman_curvature(graph)?,
    };
    if let Some((min, mean, max)) = map.summary() {
        tracing::info!(kind = %config.curvature, edges = map.edge_count(), min, mean, max, "curvature ready");
    }
    Ok(map)
}

/// Non-zero coordinates of `adjacency` and their curvature values.
///
/// Adjacency indices are raw entity ids, which is how curvature is keyed.
fn edge_tensors(adjacency: &CsrMatrix, curvature: &CurvatureMap) -> Result<(Array2<i64>, Array1<f32>)> {
    let (rows, cols) = adjacency.nonzero();
    let e = rows.len();
    let mut edge_index = Array2::<i64>::zeros((2, e));
    let mut values = Array1::<f32>::zeros(e);

    for (k, (&r, &c)) in rows.iter().zip(cols.iter()).enumerate() {
        let (u, v) = (r as i64, c as i64);
        edge_index[[0, k]] = u;
        edge_index[[1, k]] = v;
        values[k] = if u == v {
            1.0
        } else {
            curvature.edge(u, v).ok_or(DatasetError::MissingCurvature { u, v })? as f32
        };
    }
    Ok((edge_index, values))
}

fn build_loaders(splits: Splits, config: &DatasetConfig) -> Result<(DataLoader, DataLoader, DataLoader)> {
    let loader_config = LoaderConfig::training(config.batch, config.workers);
    let make = |examples, stream| DataLoader::new(ExampleSet::new(examples), loader_config, config.seed, stream);

    let train = make(splits.train, TRAIN_STREAM)?;
    let val = make(splits.val, VAL_STREAM)?;
    let test = make(splits.test, TEST_STREAM)?;
    for (name, loader) in [("train", &train), ("val", &val), ("test", &test)] {
        if loader.is_empty() && !loader.dataset().is_empty() {
            tracing::warn!(
                split = name,
                examples = loader.dataset().len(),
                batch = config.batch,
                "split smaller than one batch; drop_last leaves it without batches"
            );
        }
    }
    Ok((train, val, test))
}
