//! Discrete optimal transport between two finite measures.
//!
//! All three solvers take supply `a` (length m), demand `b` (length k) and an
//! `m × k` cost matrix, and return a transport *cost*, not a plan.

use ndarray::{Array2, ArrayView2};

use crate::error::{CurvatureError, Result};

/// Residual mass below this is considered exhausted.
const MASS_EPS: f64 = 1e-12;

/// Exact Wasserstein-1 cost via successive shortest paths.
///
/// Solves the transportation problem on the bipartite network
/// `S → sources → sinks → T` using Dijkstra with node potentials (Johnson
/// reweighting), so every augmentation runs in `O((m + k)² + m·k)`.
/// Infinite costs mark forbidden routes; if mass cannot be routed at all the
/// result is `f64::INFINITY`.
pub fn emd(a: &[f64], b: &[f64], cost: ArrayView2<'_, f64>) -> Result<f64> {
    let m = a.len();
    let k = b.len();
    debug_assert_eq!(cost.shape(), &[m, k]);
    if m == 0 || k == 0 {
        return Ok(0.0);
    }

    // node layout: sources 0..m, sinks m..m+k, S = m+k, T = m+k+1
    let s = m + k;
    let t = m + k + 1;
    let v = m + k + 2;

    let mut supply: Vec<f64> = a.to_vec();
    let mut demand: Vec<f64> = b.to_vec();
    let mut flow = Array2::<f64>::zeros((m, k));
    let mut pot = vec![0.0f64; v];

    let max_iter = 4 * (m * k + m + k) + 16;
    let mut iter = 0usize;

    loop {
        let remaining_supply: f64 = supply.iter().sum();
        let remaining_demand: f64 = demand.iter().sum();
        if remaining_supply <= MASS_EPS || remaining_demand <= MASS_EPS {
            break;
        }
        if iter >= max_iter {
            return Err(CurvatureError::TransportDidNotConverge { iterations: iter });
        }
        iter += 1;

        // ── Dijkstra on reduced costs (dense, V is small) ────────────────────
        let mut dist = vec![f64::INFINITY; v];
        let mut prev = vec![usize::MAX; v];
        let mut done = vec![false; v];
        dist[s] = 0.0;

        for _ in 0..v {
            let mut u = usize::MAX;
            let mut best = f64::INFINITY;
            for (node, &d) in dist.iter().enumerate() {
                if !done[node] && d < best {
                    best = d;
                    u = node;
                }
            }
            if u == usize::MAX {
                break;
            }
            done[u] = true;

            let relax = |to: usize, arc_cost: f64, dist: &mut Vec<f64>, prev: &mut Vec<usize>| {
                let reduced = (arc_cost + pot[u] - pot[to]).max(0.0);
                let nd = best + reduced;
                if nd < dist[to] {
                    dist[to] = nd;
                    prev[to] = u;
                }
            };

            if u == s {
                for i in 0..m {
                    if supply[i] > MASS_EPS {
                        relax(i, 0.0, &mut dist, &mut prev);
                    }
                }
            } else if u < m {
                for j in 0..k {
                    let c = cost[[u, j]];
                    if c.is_finite() {
                        relax(m + j, c, &mut dist, &mut prev);
                    }
                }
            } else if u < m + k {
                let j = u - m;
                for i in 0..m {
                    if flow[[i, j]] > MASS_EPS {
                        relax(i, -cost[[i, j]], &mut dist, &mut prev);
                    }
                }
                if demand[j] > MASS_EPS {
                    relax(t, 0.0, &mut dist, &mut prev);
                }
            }
        }

        if !dist[t].is_finite() {
            // supply left but no route to any open sink
            return Ok(f64::INFINITY);
        }

        for node in 0..v {
            pot[node] += dist[node].min(dist[t]);
        }

        // ── bottleneck along S → … → T ──────────────────────────────────────
        let mut delta = f64::INFINITY;
        let mut node = t;
        while node != s {
            let p = prev[node];
            if p == s {
                delta = delta.min(supply[node]);
            } else if node == t {
                delta = delta.min(demand[p - m]);
            } else if p >= m {
                // backward arc sink p → source node
                delta = delta.min(flow[[node, p - m]]);
            }
            node = p;
        }

        // ── augment ─────────────────────────────────────────────────────────
        let mut node = t;
        while node != s {
            let p = prev[node];
            if p == s {
                supply[node] -= delta;
            } else if node == t {
                demand[p - m] -= delta;
            } else if p < m {
                flow[[p, node - m]] += delta;
            } else {
                flow[[node, p - m]] -= delta;
            }
            node = p;
        }
    }

    let mut total = 0.0;
    for ((i, j), &f) in flow.indexed_iter() {
        if f > MASS_EPS {
            total += f * cost[[i, j]];
        }
    }
    Ok(total)
}

/// Entropy-regularized transport cost `⟨P, C⟩` (Sinkhorn-Knopp).
///
/// Runs at most 1000 scaling iterations and stops once the column marginal
/// error drops below `1e-9`.
pub fn sinkhorn(a: &[f64], b: &[f64], cost: ArrayView2<'_, f64>, reg: f64) -> f64 {
    const MAX_ITER: usize = 1000;
    const STOP_THR: f64 = 1e-9;

    let m = a.len();
    let k = b.len();
    if m == 0 || k == 0 {
        return 0.0;
    }

    let kernel = cost.mapv(|c| if c.is_finite() { (-c / reg).exp() } else { 0.0 });
    let mut u = vec![1.0 / m as f64; m];
    let mut v = vec![1.0 / k as f64; k];

    for it in 0..MAX_ITER {
        for j in 0..k {
            let ktu: f64 = (0..m).map(|i| kernel[[i, j]] * u[i]).sum();
            v[j] = if ktu > 0.0 { b[j] / ktu } else { 0.0 };
        }
        for i in 0..m {
            let kv: f64 = (0..k).map(|j| kernel[[i, j]] * v[j]).sum();
            u[i] = if kv > 0.0 { a[i] / kv } else { 0.0 };
        }

        if it % 10 == 0 {
            let err: f64 = (0..k)
                .map(|j| {
                    let col: f64 = (0..m).map(|i| u[i] * kernel[[i, j]]).sum();
                    (v[j] * col - b[j]).abs()
                })
                .sum();
            if err < STOP_THR {
                break;
            }
        }
    }

    let mut total = 0.0;
    for ((i, j), &kij) in kernel.indexed_iter() {
        if kij > 0.0 {
            total += u[i] * kij * v[j] * cost[[i, j]];
        }
    }
    total
}

/// Average transportation distance `Σᵢⱼ aᵢ bⱼ cᵢⱼ`.
pub fn average_transport(a: &[f64], b: &[f64], cost: ArrayView2<'_, f64>) -> f64 {
    let mut total = 0.0;
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            total += ai * bj * cost[[i, j]];
        }
    }
    total
}
