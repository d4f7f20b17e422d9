use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use curvlink_dataset::{
    load_data, write_dataset, CurvatureKind, DatasetConfig, DatasetError, FeatureType,
    NegativeSampling,
};
use curvlink_graph::GraphError;
use tempfile::{NamedTempFile, TempDir};

/// Ring lattice: every node linked to its two nearest neighbours on each side.
fn ring_lattice(n: i64) -> Vec<(i64, i64)> {
    let mut edges = Vec::new();
    for i in 0..n {
        edges.push((i, (i + 1) % n));
        edges.push((i, (i + 2) % n));
    }
    edges
}

fn write_edges(edges: &[(i64, i64)]) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    for (u, v) in edges {
        writeln!(f, "{u} {v}").unwrap();
    }
    f.flush().unwrap();
    f
}

fn config_for(path: &Path) -> DatasetConfig {
    DatasetConfig { in_file: path.to_path_buf(), batch: 8, seed: 11, ..Default::default() }
}

#[test]
fn ring_lattice_end_to_end() {
    let file = write_edges(&ring_lattice(30));
    let prepared = load_data(&config_for(file.path())).unwrap();

    assert_eq!(prepared.num_nodes, 30);
    assert_eq!(prepared.positives, 60);
    assert_eq!(prepared.negatives, 60);

    // 60 positives: val 6, test 12, train 42 (each doubled by negatives)
    assert_eq!(prepared.train.dataset().len(), 84);
    assert_eq!(prepared.val.dataset().len(), 12);
    assert_eq!(prepared.test.dataset().len(), 24);

    // symmetric adjacency of the 42 training positives
    assert_eq!(prepared.data.num_edges(), 84);
    assert_eq!(prepared.data.edge_index.nrows(), 2);
    assert_eq!(prepared.data.curvature.len(), 84);
    assert!(prepared.data.curvature.iter().all(|k| k.is_finite() && *k <= 1.0));

    // one-hot default
    assert_eq!(prepared.data.x.dim(), (30, 30));
    assert_eq!(prepared.feature_dim, 30);
}

#[test]
fn adjacency_and_curvature_are_symmetric() {
    let file = write_edges(&ring_lattice(30));
    let prepared = load_data(&config_for(file.path())).unwrap();
    let data = &prepared.data;

    let mut by_pair = HashMap::new();
    for k in 0..data.num_edges() {
        by_pair.insert((data.edge_index[[0, k]], data.edge_index[[1, k]]), data.curvature[k]);
    }
    for (&(u, v), &k) in &by_pair {
        assert_eq!(by_pair.get(&(v, u)), Some(&k), "({u}, {v}) has no mirrored entry");
    }
}

#[test]
fn every_training_positive_is_in_the_adjacency() {
    let file = write_edges(&ring_lattice(30));
    let prepared = load_data(&config_for(file.path())).unwrap();
    let data = &prepared.data;

    let adjacency: HashSet<(i64, i64)> =
        (0..data.num_edges()).map(|k| (data.edge_index[[0, k]], data.edge_index[[1, k]])).collect();
    for e in prepared.train.dataset().examples().iter().filter(|e| e.label == 1) {
        assert!(adjacency.contains(&(e.entity1, e.entity2)));
        assert!(adjacency.contains(&(e.entity2, e.entity1)));
    }
}

#[test]
fn negatives_never_collide_with_positives() {
    let edges = ring_lattice(30);
    let file = write_edges(&edges);
    for strategy in [NegativeSampling::Exhaustive, NegativeSampling::Rejection] {
        let cfg = DatasetConfig { negative_sampling: strategy, ..config_for(file.path()) };
        let prepared = load_data(&cfg).unwrap();

        let positive: HashSet<(i64, i64)> = edges.iter().flat_map(|&(u, v)| [(u, v), (v, u)]).collect();
        let all = [&prepared.train, &prepared.val, &prepared.test];
        let negatives: Vec<(i64, i64)> = all
            .iter()
            .flat_map(|l| l.dataset().examples().iter())
            .filter(|e| e.label == 0)
            .map(|e| e.pair())
            .collect();

        assert_eq!(negatives.len(), 60);
        assert_eq!(negatives.iter().collect::<HashSet<_>>().len(), 60);
        for (u, v) in negatives {
            assert_ne!(u, v);
            assert!(!positive.contains(&(u, v)), "{strategy}: negative ({u}, {v}) is an edge");
        }
    }
}

#[test]
fn same_seed_same_dataset() {
    let file = write_edges(&ring_lattice(30));
    let cfg = DatasetConfig { feature_type: FeatureType::Normal, dimensions: 8, ..config_for(file.path()) };

    let mut a = load_data(&cfg).unwrap();
    let mut b = load_data(&cfg).unwrap();
    assert_eq!(a.data.edge_index, b.data.edge_index);
    assert_eq!(a.data.curvature, b.data.curvature);
    assert_eq!(a.data.x, b.data.x);
    assert_eq!(a.train.dataset().examples(), b.train.dataset().examples());
    assert_eq!(a.train.epoch(), b.train.epoch());
    assert_eq!(a.test.epoch(), b.test.epoch());

    let other = load_data(&DatasetConfig { seed: 12, ..cfg }).unwrap();
    assert_ne!(a.train.dataset().examples(), other.train.dataset().examples());
}

#[test]
fn worker_count_does_not_change_the_result() {
    let file = write_edges(&ring_lattice(30));
    let serial = load_data(&config_for(file.path())).unwrap();
    let pooled = load_data(&DatasetConfig { workers: 2, ..config_for(file.path()) }).unwrap();
    assert_eq!(serial.data.edge_index, pooled.data.edge_index);
    assert_eq!(serial.data.curvature, pooled.data.curvature);
}

#[test]
fn feature_strategies_have_one_row_per_node() {
    let file = write_edges(&ring_lattice(30));
    let expected = [
        (FeatureType::OneHot, 30),
        (FeatureType::Uniform, 16),
        (FeatureType::Normal, 16),
        (FeatureType::Position, 30),
    ];
    for (feature_type, cols) in expected {
        let cfg = DatasetConfig { feature_type, dimensions: 16, ..config_for(file.path()) };
        let prepared = load_data(&cfg).unwrap();
        assert_eq!(prepared.data.x.dim(), (30, cols), "{feature_type}");
        assert_eq!(prepared.feature_dim, cols);
    }
}

#[test]
fn uniform_and_position_rows_are_normalized() {
    let file = write_edges(&ring_lattice(30));
    for feature_type in [FeatureType::Uniform, FeatureType::Position] {
        let cfg = DatasetConfig { feature_type, dimensions: 16, ..config_for(file.path()) };
        let x = load_data(&cfg).unwrap().data.x;
        for row in x.rows() {
            let sum: f32 = row.sum();
            assert!(sum == 0.0 || (sum - 1.0).abs() < 1e-4, "{feature_type}: row sum {sum}");
        }
    }
}

#[test]
fn forman_curvature_option() {
    let file = write_edges(&ring_lattice(30));
    let cfg = DatasetConfig { curvature: CurvatureKind::Forman, ..config_for(file.path()) };
    let prepared = load_data(&cfg).unwrap();
    // every node of the lattice has degree 4, so 4 - 4 - 4
    assert!(prepared.data.curvature.iter().all(|&k| k == -4.0));
}

#[test]
fn network_ratio_subsamples_positives() {
    let file = write_edges(&ring_lattice(30));
    let cfg = DatasetConfig { network_ratio: 0.5, ..config_for(file.path()) };
    let prepared = load_data(&cfg).unwrap();
    assert_eq!(prepared.positives, 30);
    assert_eq!(prepared.num_nodes, 30);
    let total = prepared.train.dataset().len() + prepared.val.dataset().len() + prepared.test.dataset().len();
    assert_eq!(total, 60);
}

#[test]
fn empty_sample_is_an_error() {
    let file = write_edges(&[(0, 1), (1, 2), (2, 3)]);
    let cfg = DatasetConfig { network_ratio: 0.1, ..config_for(file.path()) };
    assert!(matches!(load_data(&cfg), Err(DatasetError::EmptySample { total: 3, .. })));
}

#[test]
fn complete_graph_has_no_negatives() {
    let file = write_edges(&[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    assert!(matches!(
        load_data(&config_for(file.path())),
        Err(DatasetError::InsufficientNegatives { requested: 6, available: 0 })
    ));
}

#[test]
fn sparse_ids_are_out_of_range() {
    // 4 distinct entities, but id 10 cannot index a 4 x 4 adjacency
    let file = write_edges(&[(0, 1), (1, 2), (2, 10)]);
    assert!(matches!(
        load_data(&config_for(file.path())),
        Err(DatasetError::Graph(GraphError::IndexOutOfRange { .. }))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let cfg = config_for(Path::new("/definitely/not/here.txt"));
    assert!(matches!(load_data(&cfg), Err(DatasetError::Graph(GraphError::Io { .. }))));
}

#[test]
fn invalid_config_is_rejected_before_reading() {
    let cfg = DatasetConfig {
        in_file: "/definitely/not/here.txt".into(),
        val_ratio: 0.5,
        test_ratio: 0.5,
        ..Default::default()
    };
    assert!(matches!(load_data(&cfg), Err(DatasetError::Config(_))));
}

#[test]
fn export_writes_all_files() {
    let file = write_edges(&ring_lattice(30));
    let cfg = config_for(file.path());
    let prepared = load_data(&cfg).unwrap();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    write_dataset(&out, &prepared, &cfg).unwrap();

    let train = std::fs::read_to_string(out.join("train.tsv")).unwrap();
    assert_eq!(train.lines().count(), 84);
    assert_eq!(train.lines().next().unwrap().split('\t').count(), 3);

    let edges = std::fs::read_to_string(out.join("edge_index.tsv")).unwrap();
    assert_eq!(edges.lines().count(), 84);

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["num_nodes"], 30);
    assert_eq!(summary["positives"], 60);
    assert_eq!(summary["config"]["feature_type"], "one_hot");
    assert!(out.join("val.tsv").exists());
    assert!(out.join("test.tsv").exists());
}
