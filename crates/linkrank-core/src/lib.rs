#![forbid(unsafe_code)]
//! linkrank-core library.
//!
//! Turns a directed link relation between pages into PageRank scores.
//!
//! ```text
//! LinkRelation / LinkGraph
//!        ↓  graph::adjacency::build_adjacency()
//! AdjacencyMap
//!        ↓  metrics::pagerank::compute_ranks()
//! RankVector
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Typed [`RankError`] for the computation core, `anyhow::Result`
//!   for file and config I/O.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod metrics;

pub use error::{ErrorCode, RankError};
pub use graph::{AdjacencyBuilder, AdjacencyMap, LinkGraph, LinkRelation, LinkStats};
pub use metrics::pagerank::{
    PageRankConfig, PageRankResult, RankVector, RankedNode, Stopping, compute_ranks, pagerank,
};

/// Upper bound on the node count accepted by the dense matrix path.
pub const DEFAULT_MAX_NODES: usize = 100;

/// Default probability of following a link rather than jumping.
pub const DEFAULT_DAMPING: f64 = 0.85;

/// Default number of synchronous update rounds.
pub const DEFAULT_ITERATIONS: usize = 100;
