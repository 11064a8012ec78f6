//! Labeled link graph construction.
//!
//! # Overview
//!
//! [`LinkGraph`] is the sparse, name-addressed way to describe a web graph:
//! pages are added by label and links between them by label pair. Node
//! indices are assigned in insertion order, so the first page added is node
//! 0. The graph converts into the dense [`LinkRelation`] or directly into an
//! [`AdjacencyMap`] for ranking.
//!
//! ## Duplicate Links
//!
//! Multi-edges are not modeled. Adding the same link twice leaves a single
//! edge in the graph.
//!
//! ## Removal
//!
//! Removing a page drops its links and moves the last page into the freed
//! index, so indices taken before a removal may no longer be valid.
//!
//! ## Cache Invalidation
//!
//! [`LinkGraph::content_hash`] is a BLAKE3 hash of the sorted labeled edge
//! list. It changes only when the set of links changes.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::RankError;
use crate::graph::adjacency::AdjacencyMap;
use crate::graph::relation::LinkRelation;

// ---------------------------------------------------------------------------
// LinkGraph
// ---------------------------------------------------------------------------

/// A directed graph of pages keyed by label.
///
/// An edge `A → B` means page A contains a hyperlink to page B.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl LinkGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph whose pages are `labels` (in order) and whose links are
    /// set entries of `relation`.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::SizeMismatch`] if the label count differs from
    /// the relation size.
    pub fn from_relation(relation: &LinkRelation, labels: &[String]) -> Result<Self, RankError> {
        if labels.len() != relation.size() {
            return Err(RankError::SizeMismatch {
                expected: relation.size(),
                actual: labels.len(),
            });
        }

        let mut graph = Self::new();
        let indices: Vec<usize> = labels.iter().map(|l| graph.add_page(l)).collect();
        for (i, &from) in indices.iter().enumerate() {
            for (j, linked) in relation.row(i).enumerate() {
                if linked {
                    graph.add_link_by_index(from, indices[j]);
                }
            }
        }
        Ok(graph)
    }

    /// Add a page and return its node index. Adding an existing label returns
    /// the index it already has.
    pub fn add_page(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.node_map.get(label) {
            return idx.index();
        }
        let idx = self.graph.add_node(label.to_string());
        self.node_map.insert(label.to_string(), idx);
        idx.index()
    }

    /// Add a link `from → to`, creating either page if needed.
    pub fn add_link(&mut self, from: &str, to: &str) {
        let a = self.add_page(from);
        let b = self.add_page(to);
        self.add_link_by_index(a, b);
    }

    /// Remove the link `from → to`. Returns `false` if it was not present.
    pub fn remove_link(&mut self, from: &str, to: &str) -> bool {
        let (Some(&a), Some(&b)) = (self.node_map.get(from), self.node_map.get(to)) else {
            return false;
        };
        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        }
    }

    /// Remove a page and every link touching it. Returns `false` for an
    /// unknown label.
    pub fn remove_page(&mut self, label: &str) -> bool {
        let Some(idx) = self.node_map.remove(label) else {
            return false;
        };
        self.graph.remove_node(idx);
        // petgraph swaps the last node into the freed slot.
        if let Some(moved) = self.graph.node_weight(idx) {
            self.node_map.insert(moved.clone(), idx);
        }
        true
    }

    fn add_link_by_index(&mut self, from: usize, to: usize) {
        let (a, b) = (NodeIndex::new(from), NodeIndex::new(to));
        // Avoid duplicate edges (petgraph allows them by default).
        if !self.graph.contains_edge(a, b) {
            self.graph.add_edge(a, b, ());
        }
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the node index for a label.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.node_map.get(label).map(|idx| idx.index())
    }

    /// Return the label for a node index.
    #[must_use]
    pub fn label(&self, idx: usize) -> Option<&str> {
        self.graph.node_weight(NodeIndex::new(idx)).map(String::as_str)
    }

    /// All labels in node-index order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.graph.node_weights().cloned().collect()
    }

    /// `(from, to)` index pairs for every link.
    #[must_use]
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect()
    }

    /// Dense relation over all pages.
    #[must_use]
    pub fn to_relation(&self) -> LinkRelation {
        let mut relation = LinkRelation::empty(self.page_count());
        for (from, to) in self.edges() {
            relation.set(from, to);
        }
        relation
    }

    /// Sparse adjacency over all pages, without the dense capacity limit.
    #[must_use]
    pub fn to_adjacency(&self) -> AdjacencyMap {
        AdjacencyMap::from_checked_edges(self.page_count(), &self.edges())
    }

    /// BLAKE3 hash of the sorted labeled edge list, prefixed `blake3:`.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut pairs: Vec<(&str, &str)> = self
            .graph
            .edge_references()
            .map(|e| (self.graph[e.source()].as_str(), self.graph[e.target()].as_str()))
            .collect();
        pairs.sort_unstable();
        compute_edge_hash(&pairs)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn compute_edge_hash(edges: &[(&str, &str)]) -> String {
    let mut hasher = blake3::Hasher::new();
    for (from, to) in edges {
        hasher.update(from.as_bytes());
        hasher.update(b"\x00");
        hasher.update(to.as_bytes());
        hasher.update(b"\n");
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
