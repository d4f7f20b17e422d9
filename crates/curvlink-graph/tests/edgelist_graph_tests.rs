// Integration tests: on-disk edge lists through to symmetric adjacency.

use std::io::Write;

use curvlink_graph::{connected_components, read_edge_list, CooMatrix, Graph, GraphError};

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn file_to_graph() {
    let file = write_temp("0 1\n1 2\n2 0\n3 4\n");
    let edges = read_edge_list(file.path()).unwrap();
    assert_eq!(edges.len(), 4);

    let g = Graph::from_edges(&edges);
    assert_eq!(g.node_count(), 5);
    assert_eq!(g.edge_count(), 4);
    assert_eq!(connected_components(&g).component_count, 2);
}

#[test]
fn malformed_file_fails_with_line() {
    let file = write_temp("0 1\n\n1 two\n");
    match read_edge_list(file.path()) {
        Err(GraphError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn adjacency_from_file_is_symmetric() {
    let file = write_temp("0 1\n1 2\n2 3\n3 0\n");
    let edges = read_edge_list(file.path()).unwrap();
    let adj = CooMatrix::from_pairs(4, &edges).unwrap().to_csr().symmetrize();
    assert!(adj.is_symmetric());
    assert_eq!(adj.nnz(), 8);

    let (rows, cols) = adj.nonzero();
    for (&r, &c) in rows.iter().zip(&cols) {
        assert!(edges.contains(&(r as i64, c as i64)) || edges.contains(&(c as i64, r as i64)));
    }
}
