//! Positive subsampling and negative sampling for link prediction.
//!
//! Every function takes the run seed and builds its own rng, so each stage is
//! reproducible on its own: changing the negative strategy never perturbs
//! which positives were kept.
//!
//! Negatives come from the complement of the *sampled* graph (self-loops
//! included), so a negative pair can never coincide with any kept positive
//! in either orientation.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use curvlink_graph::Graph;

use crate::config::NegativeSampling;
use crate::error::{DatasetError, Result};

/// Deterministic, platform-stable rng for `seed`.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Shuffle the positive rows and keep the first `⌊len · ratio⌋`.
pub fn subsample_positives(edges: &[(i64, i64)], ratio: f64, seed: u64) -> Vec<(i64, i64)> {
    let link_size = (edges.len() as f64 * ratio) as usize;
    let mut shuffled = edges.to_vec();
    shuffled.shuffle(&mut seeded_rng(seed));
    shuffled.truncate(link_size);
    tracing::debug!(total = edges.len(), kept = link_size, ratio, "positives subsampled");
    shuffled
}

/// Draw `count` distinct non-adjacent pairs from `graph`.
///
/// Fails with [`DatasetError::InsufficientNegatives`] when the complement
/// holds fewer than `count` pairs.
pub fn sample_negatives(
    graph: &Graph,
    count: usize,
    seed: u64,
    strategy: NegativeSampling,
) -> Result<Vec<(i64, i64)>> {
    let available = graph.non_edge_count();
    if available < count {
        return Err(DatasetError::InsufficientNegatives { requested: count, available });
    }

    let negatives = match strategy {
        NegativeSampling::Exhaustive => exhaustive_negatives(graph, count, seed),
        // rejection degrades badly once most of the complement is needed
        NegativeSampling::Rejection if count.saturating_mul(2) > available => {
            tracing::debug!(count, available, "complement too small for rejection sampling, enumerating");
            exhaustive_negatives(graph, count, seed)
        }
        NegativeSampling::Rejection => rejection_negatives(graph, count, seed),
    };
    Ok(negatives)
}

fn exhaustive_negatives(graph: &Graph, count: usize, seed: u64) -> Vec<(i64, i64)> {
    let mut all = graph.non_edges();
    all.shuffle(&mut seeded_rng(seed));
    all.truncate(count);
    all
}

fn rejection_negatives(graph: &Graph, count: usize, seed: u64) -> Vec<(i64, i64)> {
    let n = graph.node_count();
    let mut rng = seeded_rng(seed);
    let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(count);
    let mut out = Vec::with_capacity(count);

    while out.len() < count {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        if a == b {
            continue;
        }
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        let (u, v) = (graph.id_of(i), graph.id_of(j));
        if graph.has_edge(u, v) || !seen.insert((i, j)) {
            continue;
        }
        out.push((u, v));
    }
    out
}
