//! Loading link data from disk.
//!
//! Two formats are understood:
//!
//! - **Matrix JSON**, as written by the link analyzer:
//!   `{"adjacency_matrix": [[0,1],[1,0]], "index_to_url": {"0": "https://a"}, ...}`.
//!   Any other top-level keys (e.g. `url_to_index`) are ignored.
//! - **Edge list**: one `from to` pair of page labels per line. Blank lines and
//!   lines starting with `#` are skipped.
//!
//! Both produce a [`LinkDataset`]. Matrices stay dense; edge lists stay a
//! sparse [`LinkGraph`] and never pass through an N×N relation, so they are
//! not subject to the matrix capacity. Parse and I/O failures are reported through
//! `anyhow` with the offending path or line attached; shape errors inside a
//! well-formed file surface as [`RankError`](crate::RankError) in the chain.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::RankError;
use crate::graph::{AdjacencyBuilder, AdjacencyMap, LinkGraph, LinkRelation};

/// Where a dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Matrix,
    EdgeList,
    Demo,
}

/// How a dataset stores its links.
#[derive(Debug, Clone)]
pub enum LinkData {
    /// N×N matrix, from analyzer JSON or the demo site.
    Dense(LinkRelation),
    /// Labeled graph, from an edge list.
    Sparse(LinkGraph),
}

/// Link data together with one display label per page.
#[derive(Debug, Clone)]
pub struct LinkDataset {
    pub links: LinkData,
    pub labels: Vec<String>,
    pub kind: DatasetKind,
}

impl LinkDataset {
    /// Label of page `i`, falling back to `Page {i}`.
    #[must_use]
    pub fn label(&self, i: usize) -> String {
        self.labels
            .get(i)
            .cloned()
            .unwrap_or_else(|| fallback_label(i))
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        match &self.links {
            LinkData::Dense(relation) => relation.size(),
            LinkData::Sparse(graph) => graph.page_count(),
        }
    }

    /// Number of distinct links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        match &self.links {
            LinkData::Dense(relation) => relation.link_count(),
            LinkData::Sparse(graph) => graph.link_count(),
        }
    }

    /// The dense relation, if the dataset has one.
    #[must_use]
    pub const fn relation(&self) -> Option<&LinkRelation> {
        match &self.links {
            LinkData::Dense(relation) => Some(relation),
            LinkData::Sparse(_) => None,
        }
    }

    /// Outlink lists for ranking. Dense data is checked against `max_nodes`;
    /// sparse data only has to be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::InvalidSize`] for an empty dataset or a matrix
    /// above `max_nodes`.
    pub fn adjacency(&self, max_nodes: usize) -> Result<AdjacencyMap, RankError> {
        match &self.links {
            LinkData::Dense(relation) => {
                AdjacencyBuilder::new(max_nodes).build(relation, relation.size())
            }
            LinkData::Sparse(graph) if graph.page_count() == 0 => {
                Err(RankError::InvalidSize { n: 0, max: None })
            }
            LinkData::Sparse(graph) => Ok(graph.to_adjacency()),
        }
    }

    /// The dataset as a labeled graph. Sparse data is borrowed as is.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::SizeMismatch`] if a dense relation and its labels
    /// disagree in length.
    pub fn graph(&self) -> Result<Cow<'_, LinkGraph>, RankError> {
        match &self.links {
            LinkData::Dense(relation) => {
                LinkGraph::from_relation(relation, &self.labels).map(Cow::Owned)
            }
            LinkData::Sparse(graph) => Ok(Cow::Borrowed(graph)),
        }
    }
}

fn fallback_label(i: usize) -> String {
    format!("Page {i}")
}

// ---------------------------------------------------------------------------
// Demo
// ---------------------------------------------------------------------------

/// The built-in four-page site used when no input is given.
///
/// Home links to About and Services, About to Home and Contact, Services to
/// About and Contact, Contact to Home and Services.
#[must_use]
pub fn demo_dataset() -> LinkDataset {
    let rows = [[0, 1, 1, 0], [1, 0, 0, 1], [0, 1, 0, 1], [1, 0, 1, 0]];
    let mut relation = LinkRelation::empty(rows.len());
    for (from, row) in rows.iter().enumerate() {
        for (to, &cell) in row.iter().enumerate() {
            if cell == 1 {
                relation.set(from, to);
            }
        }
    }
    LinkDataset {
        links: LinkData::Dense(relation),
        labels: ["Home", "About", "Services", "Contact"]
            .into_iter()
            .map(String::from)
            .collect(),
        kind: DatasetKind::Demo,
    }
}

// ---------------------------------------------------------------------------
// Matrix JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MatrixFile {
    adjacency_matrix: Vec<Vec<i64>>,
    #[serde(default)]
    index_to_url: HashMap<String, String>,
}

/// Parse the analyzer's matrix JSON.
///
/// # Errors
///
/// Fails on invalid JSON, a missing `adjacency_matrix`, a non-square matrix
/// or entries other than 0 and 1.
pub fn parse_matrix_json(content: &str) -> Result<LinkDataset> {
    let file: MatrixFile =
        serde_json::from_str(content).context("invalid link matrix JSON")?;
    let relation = LinkRelation::from_rows(&file.adjacency_matrix)?;

    let labels = (0..relation.size())
        .map(|i| {
            file.index_to_url
                .get(&i.to_string())
                .cloned()
                .unwrap_or_else(|| fallback_label(i))
        })
        .collect();

    Ok(LinkDataset {
        links: LinkData::Dense(relation),
        labels,
        kind: DatasetKind::Matrix,
    })
}

/// Read and parse a matrix JSON file.
///
/// # Errors
///
/// Fails if the file cannot be read or [`parse_matrix_json`] fails.
pub fn load_matrix_json(path: &Path) -> Result<LinkDataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_matrix_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

// ---------------------------------------------------------------------------
// Edge list
// ---------------------------------------------------------------------------

/// Parse a whitespace-separated edge list into a [`LinkGraph`].
///
/// Pages are numbered in order of first appearance.
///
/// # Errors
///
/// Fails on any non-comment line that does not hold exactly two fields.
pub fn parse_edge_list(content: &str) -> Result<LinkGraph> {
    let mut graph = LinkGraph::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [from, to] = fields.as_slice() else {
            bail!(
                "line {}: expected `from to`, found {} field(s)",
                idx + 1,
                fields.len()
            );
        };
        graph.add_link(from, to);
    }
    Ok(graph)
}

/// Read and parse an edge list file.
///
/// # Errors
///
/// Fails if the file cannot be read or [`parse_edge_list`] fails.
pub fn load_edge_list(path: &Path) -> Result<LinkGraph> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_edge_list(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Load `path` as matrix JSON (`.json` extension) or as an edge list.
///
/// # Errors
///
/// Propagates the failure of the selected loader.
#[instrument]
pub fn load_dataset(path: &Path) -> Result<LinkDataset> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let dataset = if is_json {
        load_matrix_json(path)?
    } else {
        let graph = load_edge_list(path)?;
        LinkDataset {
            labels: graph.labels(),
            links: LinkData::Sparse(graph),
            kind: DatasetKind::EdgeList,
        }
    };

    debug!(
        pages = dataset.page_count(),
        links = dataset.link_count(),
        kind = ?dataset.kind,
        "loaded link data"
    );
    Ok(dataset)
}
