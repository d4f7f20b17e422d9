//! Forman-Ricci curvature (1-D, unit node weights).
//!
//! ```text
//! F(e) = w_e · ( w_v1/w_e + w_v2/w_e
//!              − Σ_{v ∈ N(v1)∖v2} w_v1 / √(w_e · w_{v1 v})
//!              − Σ_{v ∈ N(v2)∖v1} w_v2 / √(w_e · w_{v2 v}) )
//! ```
//!
//! On an unweighted graph this reduces to `4 − deg(v1) − deg(v2)`.

use curvlink_graph::Graph;

use crate::error::{CurvatureError, Result};
use crate::ollivier::CurvatureMap;
use crate::EPSILON;

pub fn forman_curvature(graph: &Graph) -> Result<CurvatureMap> {
    let mut graph = graph.clone();
    graph.remove_self_loops();

    let edges = graph.edges();
    if edges.is_empty() {
        return Err(CurvatureError::EmptyGraph);
    }
    tracing::info!(
        nodes = graph.node_count(),
        edges = edges.len(),
        "computing Forman-Ricci curvature"
    );

    // node weights are uniformly 1
    let (w_v1, w_v2) = (1.0f64, 1.0f64);
    let mut map = CurvatureMap::default();

    for (i, j, w_e) in edges {
        if w_e < EPSILON {
            return Err(CurvatureError::ZeroWeight {
                u: graph.id_of(i),
                v: graph.id_of(j),
            });
        }
        let ev1_sum: f64 = graph
            .neighbors(i)
            .filter(|&(v, _)| v != j)
            .map(|(_, w)| w_v1 / (w_e * w).sqrt())
            .sum();
        let ev2_sum: f64 = graph
            .neighbors(j)
            .filter(|&(v, _)| v != i)
            .map(|(_, w)| w_v2 / (w_e * w).sqrt())
            .sum();

        let f = w_e * (w_v1 / w_e + w_v2 / w_e - (ev1_sum + ev2_sum));
        map.insert_edge(graph.id_of(i), graph.id_of(j), f);
    }

    map.fill_node_means(&graph);
    Ok(map)
}
