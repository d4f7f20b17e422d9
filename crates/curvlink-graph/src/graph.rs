use std::collections::{BTreeMap, HashMap};

/// Undirected weighted graph over `i64` entity ids.
///
/// Nodes keep their insertion order and get a dense index on first sight.
/// `adj[i]` maps neighbour index → edge weight; a self-loop on `i` is stored
/// once, as `adj[i][i]`.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    ids: Vec<i64>,
    index: HashMap<i64, usize>,
    adj: Vec<BTreeMap<usize, f64>>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(u, v)` pairs with unit weight. Repeated pairs
    /// (in either orientation) collapse into one edge.
    pub fn from_edges(edges: &[(i64, i64)]) -> Self {
        let mut g = Self::new();
        for &(u, v) in edges {
            g.add_edge(u, v, 1.0);
        }
        g
    }

    /// Insert `id` if absent and return its index.
    pub fn add_node(&mut self, id: i64) -> usize {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.ids.len();
        self.ids.push(id);
        self.index.insert(id, idx);
        self.adj.push(BTreeMap::new());
        idx
    }

    /// Add or update the undirected edge `{u, v}`.
    pub fn add_edge(&mut self, u: i64, v: i64, weight: f64) {
        let i = self.add_node(u);
        let j = self.add_node(v);
        if self.adj[i].insert(j, weight).is_none() {
            self.edge_count += 1;
        }
        if i != j {
            self.adj[j].insert(i, weight);
        }
    }

    /// Add a self-loop on every node.
    pub fn add_self_loops(&mut self) {
        for i in 0..self.ids.len() {
            if self.adj[i].insert(i, 1.0).is_none() {
                self.edge_count += 1;
            }
        }
    }

    /// Drop every self-loop, returning how many were removed.
    pub fn remove_self_loops(&mut self) -> usize {
        let mut removed = 0;
        for (i, nbrs) in self.adj.iter_mut().enumerate() {
            if nbrs.remove(&i).is_some() {
                removed += 1;
            }
        }
        self.edge_count -= removed;
        removed
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Entity ids in insertion order.
    pub fn nodes(&self) -> &[i64] {
        &self.ids
    }

    pub fn index_of(&self, id: i64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[inline]
    pub fn id_of(&self, idx: usize) -> i64 {
        self.ids[idx]
    }

    /// Neighbour indices of `idx` with edge weights, ascending by index.
    /// Includes `idx` itself if it carries a self-loop.
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adj[idx].iter().map(|(&j, &w)| (j, w))
    }

    /// Number of incident edges, a self-loop counting once.
    pub fn degree(&self, idx: usize) -> usize {
        self.adj[idx].len()
    }

    pub fn has_edge(&self, u: i64, v: i64) -> bool {
        self.weight(u, v).is_some()
    }

    pub fn weight(&self, u: i64, v: i64) -> Option<f64> {
        let i = self.index_of(u)?;
        let j = self.index_of(v)?;
        self.adj[i].get(&j).copied()
    }

    /// Every undirected edge once as `(i, j, weight)` with `i <= j`, ordered by `i`.
    pub fn edges(&self) -> Vec<(usize, usize, f64)> {
        let mut out = Vec::with_capacity(self.edge_count);
        for (i, nbrs) in self.adj.iter().enumerate() {
            for (&j, &w) in nbrs.range(i..) {
                out.push((i, j, w));
            }
        }
        out
    }

    /// Every unordered pair `{u, v}`, `u != v`, that is not an edge.
    ///
    /// Ordered by `u`'s index, then `v`'s index (`v > u`). Returns entity ids.
    pub fn non_edges(&self) -> Vec<(i64, i64)> {
        let n = self.ids.len();
        let mut out = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if !self.adj[i].contains_key(&j) {
                    out.push((self.ids[i], self.ids[j]));
                }
            }
        }
        out
    }

    /// Number of unordered non-adjacent pairs, without materializing them.
    pub fn non_edge_count(&self) -> usize {
        let n = self.ids.len();
        let total = n * n.saturating_sub(1) / 2;
        let proper_edges: usize = self
            .adj
            .iter()
            .enumerate()
            .map(|(i, nbrs)| nbrs.range((i + 1)..).count())
            .sum();
        total - proper_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_plus_tail() -> Graph {
        Graph::from_edges(&[(10, 20), (20, 30), (30, 10), (30, 40)])
    }

    #[test]
    fn nodes_keep_insertion_order() {
        let g = triangle_plus_tail();
        assert_eq!(g.nodes(), &[10, 20, 30, 40]);
        assert_eq!(g.index_of(30), Some(2));
        assert_eq!(g.id_of(3), 40);
    }

    #[test]
    fn duplicate_and_reversed_edges_collapse() {
        let g = Graph::from_edges(&[(1, 2), (2, 1), (1, 2)]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(2, 1));
    }

    #[test]
    fn self_loops_round_trip() {
        let mut g = triangle_plus_tail();
        g.add_self_loops();
        assert_eq!(g.edge_count(), 8);
        assert!(g.has_edge(40, 40));
        assert_eq!(g.remove_self_loops(), 4);
        assert_eq!(g.edge_count(), 4);
        assert!(!g.has_edge(40, 40));
    }

    #[test]
    fn edges_listed_once() {
        let g = triangle_plus_tail();
        let edges = g.edges();
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|&(i, j, _)| i <= j));
    }

    #[test]
    fn non_edges_are_complement() {
        let g = triangle_plus_tail();
        let non = g.non_edges();
        assert_eq!(non, vec![(10, 40), (20, 40)]);
        assert_eq!(g.non_edge_count(), 2);
        for &(u, v) in &non {
            assert!(!g.has_edge(u, v));
        }
    }

    #[test]
    fn non_edges_ignore_self_loops() {
        let mut g = triangle_plus_tail();
        g.add_self_loops();
        assert_eq!(g.non_edges().len(), 2);
        assert_eq!(g.non_edge_count(), 2);
    }
}
