//! Basic link statistics for a web graph.
//!
//! # Statistics Provided
//!
//! - **node_count**: Number of pages.
//! - **edge_count**: Number of links (self-links included).
//! - **self_link_count**: Links from a page to itself.
//! - **dangling_count**: Pages with no outgoing links. Their rank is spread
//!   over every page during ranking.
//! - **isolated_count**: Pages with neither incoming nor outgoing links.
//! - **density**: `edge_count / node_count²`. Self-links are legal in a link
//!   relation, so the maximum possible edge count is N², not N·(N-1). Zero for
//!   an empty graph.
//! - **max_in_degree** / **max_out_degree**: Largest per-page link counts.

use serde::Serialize;

use crate::graph::adjacency::AdjacencyMap;

// ---------------------------------------------------------------------------
// LinkStats
// ---------------------------------------------------------------------------

/// Summary statistics for a link graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub self_link_count: usize,
    pub dangling_count: usize,
    pub isolated_count: usize,
    /// `edge_count / node_count²`, in `[0, 1]`.
    pub density: f64,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    /// Outgoing link count per page, indexed by node.
    pub out_degrees: Vec<usize>,
    /// Incoming link count per page, indexed by node.
    pub in_degrees: Vec<usize>,
}

impl LinkStats {
    /// Compute statistics from an [`AdjacencyMap`].
    #[must_use]
    pub fn from_adjacency(adjacency: &AdjacencyMap) -> Self {
        let node_count = adjacency.node_count();
        let edge_count = adjacency.edge_count();

        let out_degrees: Vec<usize> = (0..node_count).map(|i| adjacency.out_degree(i)).collect();
        let in_degrees = adjacency.in_degrees();

        let self_link_count = adjacency
            .iter()
            .filter(|(node, targets)| targets.binary_search(node).is_ok())
            .count();

        let dangling_count = out_degrees.iter().filter(|&&d| d == 0).count();
        let isolated_count = out_degrees
            .iter()
            .zip(&in_degrees)
            .filter(|&(&out, &inc)| out == 0 && inc == 0)
            .count();

        Self {
            node_count,
            edge_count,
            self_link_count,
            dangling_count,
            isolated_count,
            density: compute_density(node_count, edge_count),
            max_in_degree: in_degrees.iter().copied().max().unwrap_or(0),
            max_out_degree: out_degrees.iter().copied().max().unwrap_or(0),
            out_degrees,
            in_degrees,
        }
    }

    /// Return `true` if the graph has no links at all.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count == 0 {
        return 0.0_f64;
    }
    let max_edges = (node_count * node_count) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
