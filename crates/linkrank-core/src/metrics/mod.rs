//! Rank metrics over the link graph.
//!
//! [`pagerank`] is the only metric: power iteration with a damping factor,
//! dangling-mass redistribution and either a fixed round count or an L1
//! convergence test.

pub mod pagerank;
