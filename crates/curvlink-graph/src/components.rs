//! Connected components via Union-Find.

use std::collections::HashMap;

use crate::graph::Graph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentStats {
    /// Component id per node index.
    pub membership: Vec<usize>,
    pub component_count: usize,
    pub largest_component_size: usize,
}

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return;
        }
        // union by rank
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry;
        } else if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = rx;
        } else {
            self.parent[ry] = rx;
            self.rank[rx] += 1;
        }
    }
}

/// Connected components of an undirected [`Graph`].
///
/// Component ids are assigned in order of first appearance by node index.
pub fn connected_components(graph: &Graph) -> ComponentStats {
    let n = graph.node_count();
    let mut uf = UnionFind::new(n);
    for (i, j, _) in graph.edges() {
        uf.union(i, j);
    }

    let mut comp_of_root: HashMap<usize, usize> = HashMap::new();
    let mut sizes: Vec<usize> = Vec::new();
    let membership = (0..n)
        .map(|i| {
            let root = uf.find(i);
            let cid = *comp_of_root.entry(root).or_insert_with(|| {
                sizes.push(0);
                sizes.len() - 1
            });
            sizes[cid] += 1;
            cid
        })
        .collect();

    ComponentStats {
        membership,
        component_count: sizes.len(),
        largest_component_size: sizes.iter().copied().max().unwrap_or(0),
    }
}
