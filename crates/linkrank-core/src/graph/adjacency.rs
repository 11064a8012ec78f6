//! Adjacency construction: relation (or edge list) → per-node outlinks.
//!
//! # Ordering
//!
//! Each node's outlink sequence is in ascending target order. The matrix path
//! gets this for free by scanning columns left to right; the edge-list path
//! sorts and deduplicates. Both paths produce identical maps for the same
//! link set, so numeric results do not depend on how the graph was supplied.
//!
//! # Capacity
//!
//! [`AdjacencyBuilder`] enforces an upper bound on the node count
//! ([`DEFAULT_MAX_NODES`] unless configured). Oversized input is rejected,
//! never truncated.

use tracing::{debug, instrument};

use crate::DEFAULT_MAX_NODES;
use crate::error::RankError;
use crate::graph::relation::LinkRelation;

// ---------------------------------------------------------------------------
// AdjacencyMap
// ---------------------------------------------------------------------------

/// Outlink sequences for nodes `0..node_count`.
///
/// Every node is present, including nodes with no outlinks (dangling nodes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMap {
    targets: Vec<Vec<usize>>,
}

impl AdjacencyMap {
    /// Build directly from `(from, to)` pairs over `n` nodes.
    ///
    /// Duplicate pairs collapse into a single link.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::NodeOutOfRange`] if an endpoint is `>= n`.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, RankError> {
        if let Some(node) = edges
            .iter()
            .flat_map(|&(from, to)| [from, to])
            .find(|&node| node >= n)
        {
            return Err(RankError::NodeOutOfRange { node, n });
        }
        Ok(Self::from_checked_edges(n, edges))
    }

    /// Same as [`from_edges`](Self::from_edges) for endpoints already known to be `< n`.
    pub(crate) fn from_checked_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut targets: Vec<Vec<usize>> = vec![Vec::new(); n];
        for &(from, to) in edges {
            targets[from].push(to);
        }
        for list in &mut targets {
            list.sort_unstable();
            list.dedup();
        }
        Self { targets }
    }

    /// Number of nodes in the map.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.targets.len()
    }

    /// Total number of links.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.targets.iter().map(Vec::len).sum()
    }

    /// Outlinks of `node`, ascending. Empty for unknown nodes.
    #[must_use]
    pub fn outlinks(&self, node: usize) -> &[usize] {
        self.targets.get(node).map_or(&[] as &[usize], Vec::as_slice)
    }

    #[must_use]
    pub fn out_degree(&self, node: usize) -> usize {
        self.outlinks(node).len()
    }

    /// A node with no outlinks.
    #[must_use]
    pub fn is_dangling(&self, node: usize) -> bool {
        node < self.targets.len() && self.targets[node].is_empty()
    }

    /// All dangling nodes in ascending order.
    #[must_use]
    pub fn dangling_nodes(&self) -> Vec<usize> {
        (0..self.targets.len())
            .filter(|&i| self.targets[i].is_empty())
            .collect()
    }

    /// Number of incoming links per node.
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut counts = vec![0; self.targets.len()];
        for list in &self.targets {
            for &to in list {
                counts[to] += 1;
            }
        }
        counts
    }

    /// Iterate `(node, outlinks)` in ascending node order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.targets.iter().enumerate().map(|(i, t)| (i, t.as_slice()))
    }
}

// ---------------------------------------------------------------------------
// AdjacencyBuilder
// ---------------------------------------------------------------------------

/// Converts a [`LinkRelation`] into an [`AdjacencyMap`] under a capacity limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyBuilder {
    max_nodes: Option<usize>,
}

impl Default for AdjacencyBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NODES)
    }
}

impl AdjacencyBuilder {
    /// Builder accepting at most `max_nodes` nodes.
    #[must_use]
    pub const fn new(max_nodes: usize) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }

    /// Builder with no capacity limit.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_nodes: None }
    }

    /// Scan `relation` row by row and collect each row's set columns.
    ///
    /// # Errors
    ///
    /// - [`RankError::InvalidSize`] if `n == 0` or `n` exceeds the capacity.
    /// - [`RankError::SizeMismatch`] if `n` differs from the relation size.
    #[instrument(skip(self, relation), fields(size = relation.size()))]
    pub fn build(&self, relation: &LinkRelation, n: usize) -> Result<AdjacencyMap, RankError> {
        let over_capacity = self.max_nodes.is_some_and(|max| n > max);
        if n == 0 || over_capacity {
            return Err(RankError::InvalidSize {
                n,
                max: self.max_nodes,
            });
        }
        if relation.size() != n {
            return Err(RankError::SizeMismatch {
                expected: n,
                actual: relation.size(),
            });
        }

        let targets: Vec<Vec<usize>> = (0..n)
            .map(|i| {
                relation
                    .row(i)
                    .enumerate()
                    .filter_map(|(j, linked)| linked.then_some(j))
                    .collect()
            })
            .collect();

        let adjacency = AdjacencyMap { targets };
        debug!(
            nodes = n,
            edges = adjacency.edge_count(),
            "built adjacency from link relation"
        );
        Ok(adjacency)
    }
}

/// Build an adjacency map with the default capacity ([`DEFAULT_MAX_NODES`]).
///
/// # Errors
///
/// See [`AdjacencyBuilder::build`].
pub fn build_adjacency(relation: &LinkRelation, n: usize) -> Result<AdjacencyMap, RankError> {
    AdjacencyBuilder::default().build(relation, n)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
