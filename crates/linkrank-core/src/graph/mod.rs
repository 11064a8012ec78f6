//! Link graph module: everything between raw link data and ranking.
//!
//! # Overview
//!
//! Link data arrives either as a dense 0/1 matrix ([`LinkRelation`]) or as
//! labeled page pairs ([`LinkGraph`]). Both end up as an [`AdjacencyMap`],
//! the only structure the rank computation reads.
//!
//! ## Pipeline
//!
//! ```text
//! rows of 0/1                       (label, label) pairs
//!     ↓  relation::LinkRelation::from_rows()   ↓  build::LinkGraph::add_link()
//! LinkRelation  ←── LinkGraph::to_relation() ── LinkGraph
//!     ↓  adjacency::build_adjacency()          ↓  LinkGraph::to_adjacency()
//! AdjacencyMap (per-node ascending outlinks)
//!     ↓  stats::LinkStats::from_adjacency()
//! LinkStats (degrees, dangling count, density, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use linkrank_core::graph::{LinkRelation, build_adjacency, LinkStats};
//!
//! let relation = LinkRelation::from_rows(&rows)?;
//! let adjacency = build_adjacency(&relation, relation.size())?;
//! let stats = LinkStats::from_adjacency(&adjacency);
//!
//! println!("pages={} links={} dangling={}",
//!     stats.node_count, stats.edge_count, stats.dangling_count);
//! ```

pub mod adjacency;
pub mod build;
pub mod relation;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use adjacency::{AdjacencyBuilder, AdjacencyMap, build_adjacency};
pub use build::LinkGraph;
pub use relation::LinkRelation;
pub use stats::LinkStats;
