//! Integration tests for link data loading, graph construction and link
//! statistics, exercised through the public crate API.

use std::fs;

use linkrank_core::graph::{AdjacencyBuilder, LinkGraph, LinkStats, build_adjacency};
use linkrank_core::ingest::{DatasetKind, LinkData, load_dataset, load_edge_list};
use linkrank_core::{ErrorCode, RankError, compute_ranks};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ANALYZER_JSON: &str = r#"{
  "adjacency_matrix": [
    [0, 1, 1, 0],
    [1, 0, 0, 1],
    [0, 1, 0, 1],
    [0, 0, 0, 0]
  ],
  "url_to_index": {
    "https://example.com/": 0,
    "https://example.com/about": 1,
    "https://example.com/services": 2,
    "https://example.com/contact": 3
  },
  "index_to_url": {
    "0": "https://example.com/",
    "1": "https://example.com/about",
    "2": "https://example.com/services",
    "3": "https://example.com/contact"
  }
}"#;

fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

// ---------------------------------------------------------------------------
// Matrix JSON
// ---------------------------------------------------------------------------

#[test]
fn analyzer_matrix_ranks_contact_page_highest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(&dir, "adjacency_matrix.json", ANALYZER_JSON);

    let dataset = load_dataset(&path).expect("load");
    assert_eq!(dataset.kind, DatasetKind::Matrix);
    assert_eq!(dataset.label(3), "https://example.com/contact");

    let relation = dataset.relation().expect("matrix input stays dense");
    let adjacency = build_adjacency(relation, dataset.page_count()).expect("adjacency");
    let stats = LinkStats::from_adjacency(&adjacency);
    assert_eq!(stats.node_count, 4);
    assert_eq!(stats.edge_count, 6);
    assert_eq!(stats.dangling_count, 1);
    assert_eq!(stats.in_degrees, vec![1, 2, 1, 2]);

    let ranks = compute_ranks(&adjacency, dataset.page_count()).expect("ranks");
    assert!((ranks.sum() - 1.0).abs() < 1e-6);
    let top = ranks.top(1);
    assert_eq!(dataset.label(top[0].node), "https://example.com/contact");
}

#[test]
fn oversized_matrix_rejected_by_default_capacity() {
    let n = 101;
    let rows: Vec<Vec<u8>> = vec![vec![0; n]; n];
    let json = serde_json::json!({ "adjacency_matrix": rows }).to_string();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(&dir, "big.json", &json);
    let dataset = load_dataset(&path).expect("load");

    let relation = dataset.relation().expect("dense");
    let err = build_adjacency(relation, n).expect_err("over capacity");
    assert_eq!(err.code(), ErrorCode::InvalidSize);

    let adjacency = AdjacencyBuilder::new(200)
        .build(relation, n)
        .expect("raised capacity");
    assert_eq!(adjacency.node_count(), n);

    let err = dataset.adjacency(100).expect_err("dataset view enforces the same limit");
    assert_eq!(err, RankError::InvalidSize { n, max: Some(100) });
}

#[test]
fn malformed_matrix_surfaces_typed_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(&dir, "bad.json", r#"{"adjacency_matrix": [[0, 1], [1]]}"#);

    let err = load_dataset(&path).expect_err("ragged");
    let rank = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<RankError>())
        .expect("typed cause");
    assert_eq!(rank.code().code(), "E1003");
    assert!(format!("{err:#}").contains("bad.json"));
}

// ---------------------------------------------------------------------------
// Edge lists
// ---------------------------------------------------------------------------

#[test]
fn edge_list_round_trips_through_graph() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(
        &dir,
        "links.tsv",
        "# crawled 2024-05-01\nhome\tabout\nhome\tblog\nabout\thome\nblog\tblog\nhome\tabout\n",
    );

    let graph = load_edge_list(&path).expect("parse");
    assert_eq!(graph.page_count(), 3);
    assert_eq!(graph.link_count(), 4);
    assert_eq!(graph.label(2), Some("blog"));

    let stats = LinkStats::from_adjacency(&graph.to_adjacency());
    assert_eq!(stats.self_link_count, 1);
    assert_eq!(stats.dangling_count, 0);
    assert_eq!(stats.out_degrees, vec![2, 1, 1]);
}

#[test]
fn content_hash_ignores_line_order() {
    let a = linkrank_core::ingest::parse_edge_list("a b\nb c\nc a\n").expect("parse");
    let b = linkrank_core::ingest::parse_edge_list("c a\na b\nb c\n").expect("parse");
    assert_eq!(a.content_hash(), b.content_hash());
    assert!(a.content_hash().starts_with("blake3:"));

    let c = linkrank_core::ingest::parse_edge_list("a b\nb c\n").expect("parse");
    assert_ne!(a.content_hash(), c.content_hash());
}

#[test]
fn relation_built_from_graph_matches_graph_adjacency() {
    let mut graph = LinkGraph::new();
    graph.add_link("x", "y");
    graph.add_link("y", "z");
    graph.add_page("orphan");

    let relation = graph.to_relation();
    let dense = build_adjacency(&relation, graph.page_count()).expect("adjacency");
    assert_eq!(dense, graph.to_adjacency());
    assert!(dense.is_dangling(3));
    assert!(dense.is_dangling(2));
}

#[test]
fn large_edge_list_file_ranks_without_dense_relation() {
    // A 60,000-page chain. A dense relation would need 3.6e9 cells.
    let n = 60_000;
    let content: String = (0..n - 1)
        .map(|i| format!("p{i} p{}\n", i + 1))
        .collect();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(&dir, "chain.txt", &content);

    let dataset = load_dataset(&path).expect("load");
    assert_eq!(dataset.kind, DatasetKind::EdgeList);
    assert!(matches!(dataset.links, LinkData::Sparse(_)));
    assert!(dataset.relation().is_none());
    assert_eq!(dataset.page_count(), n);
    assert_eq!(dataset.link_count(), n - 1);
    assert_eq!(dataset.label(n - 1), format!("p{}", n - 1));

    // The matrix capacity does not apply to edge lists.
    let adjacency = dataset.adjacency(100).expect("sparse adjacency");
    assert_eq!(adjacency.node_count(), n);
    assert_eq!(adjacency.dangling_nodes(), vec![n - 1]);

    let ranks = compute_ranks(&adjacency, n).expect("ranks");
    assert_eq!(ranks.len(), n);
    assert!((ranks.sum() - 1.0).abs() < 1e-6);
    assert!(ranks.get(1) > ranks.get(0));

    let graph = dataset.graph().expect("graph view");
    let stats = LinkStats::from_adjacency(&graph.to_adjacency());
    assert_eq!(stats.dangling_count, 1);
    assert_eq!(stats.max_in_degree, 1);
}
