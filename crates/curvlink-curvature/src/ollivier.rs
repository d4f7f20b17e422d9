//! Ollivier-Ricci curvature.
//!
//! For an edge `(x, y)` the lazy random-walk measure of `x` is
//!
//! ```text
//! mₓ(x)   = α
//! mₓ(v)   = (1 − α) · base^(−w(x,v)^p) / Σ_u base^(−w(x,u)^p)     v ∈ N(x)
//! ```
//!
//! and the curvature is `κ(x, y) = 1 − W(mₓ, m_y) / d(x, y)`.
//!
//! - Complete graphs and dense clusters → `κ > 0`
//! - Lines and cycles of length ≥ 6 with `α = 0.5` → `κ = 0`
//! - Bridges between communities → `κ < 0`

use std::collections::HashMap;

use rayon::prelude::*;

use curvlink_graph::Graph;

use crate::config::{OllivierConfig, OtMethod};
use crate::distance::pairwise_distances;
use crate::error::{CurvatureError, Result};
use crate::transport::{average_transport, emd, sinkhorn};
use crate::EPSILON;

/// Per-edge and per-node curvature, keyed by entity id.
#[derive(Debug, Clone, Default)]
pub struct CurvatureMap {
    edges: HashMap<(i64, i64), f64>,
    nodes: HashMap<i64, f64>,
}

impl CurvatureMap {
    #[inline]
    fn key(u: i64, v: i64) -> (i64, i64) {
        if u <= v { (u, v) } else { (v, u) }
    }

    pub fn insert_edge(&mut self, u: i64, v: i64, curvature: f64) {
        self.edges.insert(Self::key(u, v), curvature);
    }

    /// Curvature of `{u, v}`; symmetric in its arguments.
    pub fn edge(&self, u: i64, v: i64) -> Option<f64> {
        self.edges.get(&Self::key(u, v)).copied()
    }

    /// Mean curvature of the edges incident to `id` (0 for isolated nodes).
    pub fn node(&self, id: i64) -> Option<f64> {
        self.nodes.get(&id).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = ((i64, i64), f64)> + '_ {
        self.edges.iter().map(|(&k, &c)| (k, c))
    }

    /// `(min, mean, max)` over all edges, `None` if there are none.
    pub fn summary(&self) -> Option<(f64, f64, f64)> {
        if self.edges.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &c in self.edges.values() {
            min = min.min(c);
            max = max.max(c);
            sum += c;
        }
        Some((min, sum / self.edges.len() as f64, max))
    }

    /// Fill node curvature as the mean over incident edges.
    pub(crate) fn fill_node_means(&mut self, graph: &Graph) {
        let mut acc: HashMap<i64, (f64, usize)> = HashMap::new();
        for (&(u, v), &c) in &self.edges {
            for id in [u, v] {
                let e = acc.entry(id).or_insert((0.0, 0));
                e.0 += c;
                e.1 += 1;
            }
        }
        for &id in graph.nodes() {
            let mean = match acc.get(&id) {
                Some(&(sum, n)) if n > 0 => sum / n as f64,
                _ => 0.0,
            };
            self.nodes.insert(id, mean);
        }
    }
}

/// Ollivier-Ricci curvature over a private copy of a graph.
///
/// Self-loops are removed on construction; they carry no transport
/// information and would put mass at distance zero.
pub struct OllivierRicci {
    graph: Graph,
    config: OllivierConfig,
}

impl OllivierRicci {
    pub fn new(graph: &Graph, config: OllivierConfig) -> Self {
        let mut graph = graph.clone();
        let removed = graph.remove_self_loops();
        if removed > 0 {
            tracing::info!(removed, "self-loop edges detected, removing before curvature");
        }
        Self { graph, config }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &OllivierConfig {
        &self.config
    }

    /// Lazy neighbour measure of node `idx`: `(masses, support)`.
    ///
    /// The node itself is always the last support point.
    fn neighbor_distribution(&self, idx: usize) -> (Vec<f64>, Vec<usize>) {
        let cfg = &self.config;
        let mut weighted: Vec<(f64, usize)> = self
            .graph
            .neighbors(idx)
            .filter(|&(nbr, _)| nbr != idx)
            .map(|(nbr, w)| (cfg.base.powf(-w.powf(cfg.exp_power)), nbr))
            .collect();

        if weighted.is_empty() {
            return (vec![1.0], vec![idx]);
        }

        if weighted.len() > cfg.nbr_topk {
            weighted.sort_by(|a, b| {
                b.0.partial_cmp(&a.0)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.1.cmp(&b.1))
            });
            weighted.truncate(cfg.nbr_topk);
        }

        let total: f64 = weighted.iter().map(|&(w, _)| w).sum();
        let count = weighted.len() as f64;
        let mut masses: Vec<f64> = weighted
            .iter()
            .map(|&(w, _)| {
                if total > EPSILON {
                    (1.0 - cfg.alpha) * w / total
                } else {
                    (1.0 - cfg.alpha) / count
                }
            })
            .collect();
        let mut support: Vec<usize> = weighted.into_iter().map(|(_, nbr)| nbr).collect();

        masses.push(cfg.alpha);
        support.push(idx);
        (masses, support)
    }

    /// Curvature of the single edge between node indices `x` and `y`.
    fn edge_curvature(&self, x: usize, y: usize, weight: f64) -> Result<f64> {
        if weight < EPSILON {
            return Err(CurvatureError::ZeroWeight {
                u: self.graph.id_of(x),
                v: self.graph.id_of(y),
            });
        }

        let (mx, sx) = self.neighbor_distribution(x);
        let (my, sy) = self.neighbor_distribution(y);
        // every support pair is joined by x-hop, the edge, y-hop
        let reach = |idx: usize| self.graph.neighbors(idx).map(|(_, w)| w).fold(0.0, f64::max);
        let cutoff = reach(x) + weight + reach(y) + EPSILON;
        let cost = pairwise_distances(&self.graph, &sx, &sy, cutoff);

        // both measures end with their own node
        let d_xy = cost[[sx.len() - 1, sy.len() - 1]];
        if d_xy < EPSILON {
            return Err(CurvatureError::ZeroDistance {
                u: self.graph.id_of(x),
                v: self.graph.id_of(y),
            });
        }

        let cfg = &self.config;
        let w = match cfg.method {
            OtMethod::Otd => emd(&mx, &my, cost.view())?,
            OtMethod::Atd => average_transport(&mx, &my, cost.view()),
            OtMethod::Sinkhorn => sinkhorn(&mx, &my, cost.view(), cfg.sinkhorn_reg),
            OtMethod::OtdSinkhornMix => {
                if mx.len() * my.len() > cfg.otd_sinkhorn_threshold {
                    sinkhorn(&mx, &my, cost.view(), cfg.sinkhorn_reg)
                } else {
                    emd(&mx, &my, cost.view())?
                }
            }
        };

        Ok(1.0 - w / d_xy)
    }

    /// Curvature for every edge, plus node curvature as the incident mean.
    ///
    /// With `workers > 0` edges are processed on a dedicated rayon pool; the
    /// result does not depend on the thread count.
    pub fn compute_ricci_curvature(&self) -> Result<CurvatureMap> {
        self.config.validate()?;
        let edges = self.graph.edges();
        if edges.is_empty() {
            return Err(CurvatureError::EmptyGraph);
        }

        tracing::info!(
            nodes = self.graph.node_count(),
            edges = edges.len(),
            alpha = self.config.alpha,
            method = self.config.method.label(),
            workers = self.config.workers,
            "computing Ollivier-Ricci curvature"
        );

        let compute = |&(i, j, w): &(usize, usize, f64)| -> Result<(usize, usize, f64)> {
            Ok((i, j, self.edge_curvature(i, j, w)?))
        };

        let values: Vec<(usize, usize, f64)> = if self.config.workers > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.workers)
                .build()
                .map_err(|e| CurvatureError::ThreadPool(e.to_string()))?;
            pool.install(|| edges.par_iter().map(compute).collect::<Result<Vec<_>>>())?
        } else {
            edges.iter().map(compute).collect::<Result<Vec<_>>>()?
        };

        let mut map = CurvatureMap::default();
        for (i, j, k) in values {
            map.insert_edge(self.graph.id_of(i), self.graph.id_of(j), k);
        }
        map.fill_node_means(&self.graph);

        if let Some((min, mean, max)) = map.summary() {
            tracing::debug!(min, mean, max, "Ollivier-Ricci curvature computed");
        }
        Ok(map)
    }
}
