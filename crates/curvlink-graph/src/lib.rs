//! # curvlink-graph
//!
//! Graph plumbing for the curvlink link-prediction preprocessor.
//!
//! - **Edge lists**: integer-pair text files (`u v` per line).
//! - **Graph**: undirected, insertion-ordered, weighted (default weight 1.0).
//! - **Sparse**: COO → CSR adjacency with `max(A, Aᵀ)` symmetrization.
//! - **Components**: union-find connected components.
//!
//! Node ids are the raw `i64` entity ids from the input file. Internally every
//! node also has a dense `usize` index in insertion order.

pub mod components;
pub mod edgelist;
pub mod error;
pub mod graph;
pub mod sparse;

pub use components::{connected_components, ComponentStats};
pub use edgelist::{parse_edge_list, read_edge_list};
pub use error::{GraphError, Result};
pub use graph::Graph;
pub use sparse::{CooMatrix, CsrMatrix};
