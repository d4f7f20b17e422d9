//! Shortest-path distances between small node sets.
//!
//! Curvature needs the cost matrix between two neighbourhood supports. Both
//! supports sit within three hops of each other, so each row is a Dijkstra
//! search bounded by `w(x, a) + w(x, y) + w(y, b)` that stops as soon as every
//! target has been settled.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use ndarray::Array2;

use curvlink_graph::Graph;

#[derive(Debug)]
struct HeapEntry {
    idx: usize,
    dist: f64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.dist.partial_cmp(&self.dist).unwrap_or(Ordering::Equal) // min-heap
    }
}

/// Weighted shortest-path distances from `source` to each of `targets`,
/// exploring no further than `cutoff`.
///
/// Buffers are sized by the explored ball, not the graph. Targets beyond
/// `cutoff` or unreachable are `f64::INFINITY`.
pub fn dijkstra_to_targets(graph: &Graph, source: usize, targets: &[usize], cutoff: f64) -> Vec<f64> {
    let mut dist: HashMap<usize, f64> = HashMap::new();
    let mut settled: HashSet<usize> = HashSet::new();
    let mut remaining: HashSet<usize> = targets.iter().copied().collect();

    let mut heap = BinaryHeap::new();
    dist.insert(source, 0.0);
    heap.push(HeapEntry { idx: source, dist: 0.0 });

    while let Some(HeapEntry { idx, dist: d }) = heap.pop() {
        if !settled.insert(idx) {
            continue;
        }
        if remaining.remove(&idx) && remaining.is_empty() {
            break;
        }
        for (nbr, w) in graph.neighbors(idx) {
            let nd = d + w;
            if nd > cutoff {
                continue;
            }
            if nd < dist.get(&nbr).copied().unwrap_or(f64::INFINITY) {
                dist.insert(nbr, nd);
                heap.push(HeapEntry { idx: nbr, dist: nd });
            }
        }
    }

    targets
        .iter()
        .map(|t| dist.get(t).copied().unwrap_or(f64::INFINITY))
        .collect()
}

/// `|sources| × |targets|` matrix of shortest-path distances, each row a
/// search bounded by `cutoff`.
pub fn pairwise_distances(graph: &Graph, sources: &[usize], targets: &[usize], cutoff: f64) -> Array2<f64> {
    let mut cost = Array2::<f64>::zeros((sources.len(), targets.len()));
    for (i, &s) in sources.iter().enumerate() {
        for (j, d) in dijkstra_to_targets(graph, s, targets, cutoff).into_iter().enumerate() {
            cost[[i, j]] = d;
        }
    }
    cost
}
