//! Write a prepared dataset to disk.
//!
//! Layout under the target directory:
//!
//! - `train.tsv`, `val.tsv`, `test.tsv`: `entity1 entity2 label`, one example per line
//! - `edge_index.tsv`: `row col curvature`, one adjacency entry per line
//! - `summary.json`: config and counts

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::DatasetConfig;
use crate::error::Result;
use crate::pipeline::PreparedDataset;
use crate::split::Example;

#[derive(Debug, Serialize)]
struct Summary<'a> {
    dataset: String,
    config: &'a DatasetConfig,
    num_nodes: usize,
    feature_dim: usize,
    positives: usize,
    negatives: usize,
    adjacency_edges: usize,
    train_examples: usize,
    val_examples: usize,
    test_examples: usize,
}

/// Export splits, adjacency and a JSON summary into `dir` (created if needed).
pub fn write_dataset(dir: &Path, prepared: &PreparedDataset, config: &DatasetConfig) -> Result<()> {
    fs::create_dir_all(dir)?;

    write_examples(&dir.join("train.tsv"), prepared.train.dataset().examples())?;
    write_examples(&dir.join("val.tsv"), prepared.val.dataset().examples())?;
    write_examples(&dir.join("test.tsv"), prepared.test.dataset().examples())?;
    write_edge_index(&dir.join("edge_index.tsv"), prepared)?;

    let summary = Summary {
        dataset: config.dataset_name(),
        config,
        num_nodes: prepared.num_nodes,
        feature_dim: prepared.feature_dim,
        positives: prepared.positives,
        negatives: prepared.negatives,
        adjacency_edges: prepared.data.num_edges(),
        train_examples: prepared.train.dataset().len(),
        val_examples: prepared.val.dataset().len(),
        test_examples: prepared.test.dataset().len(),
    };
    let mut w = BufWriter::new(File::create(dir.join("summary.json"))?);
    serde_json::to_writer_pretty(&mut w, &summary)?;
    writeln!(w)?;
    w.flush()?;

    tracing::info!(dir = %dir.display(), "dataset exported");
    Ok(())
}

fn write_examples(path: &Path, examples: &[Example]) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for e in examples {
        writeln!(w, "{}\t{}\t{}", e.entity1, e.entity2, e.label)?;
    }
    w.flush()?;
    Ok(())
}

fn write_edge_index(path: &Path, prepared: &PreparedDataset) -> Result<()> {
    let data = &prepared.data;
    let mut w = BufWriter::new(File::create(path)?);
    for k in 0..data.num_edges() {
        writeln!(
            w,
            "{}\t{}\t{:.6}",
            data.edge_index[[0, k]],
            data.edge_index[[1, k]],
            data.curvature[k]
        )?;
    }
    w.flush()?;
    Ok(())
}
