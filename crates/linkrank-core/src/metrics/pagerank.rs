//! PageRank over a link adjacency map.
//!
//! # Overview
//!
//! PageRank scores a page by the long-run probability that a random surfer
//! is on it. At every step the surfer follows one of the current page's
//! links with probability `d` (the damping factor), or jumps to a page
//! chosen uniformly at random otherwise.
//!
//! # Algorithm
//!
//! Power iteration with a synchronous (Jacobi) update. Round `k` reads only
//! round `k - 1`'s ranks:
//!
//! ```text
//! PR(v) = (1 - d) / N
//!       + d * Σ PR(u) / out_degree(u)   for each u → v
//!       + d * Σ PR(w) / N               for each dangling w
//! ```
//!
//! Dangling pages (no outlinks) spread their rank over every page, including
//! themselves, so no rank mass leaks out of the graph and the vector keeps
//! summing to 1.
//!
//! # Stopping
//!
//! [`Stopping::Fixed`] (the default) runs exactly `iterations` rounds with no
//! convergence test. [`Stopping::Converged`] additionally stops after the
//! first round whose L1 delta falls below the tolerance.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::RankError;
use crate::graph::adjacency::AdjacencyMap;
use crate::{DEFAULT_DAMPING, DEFAULT_ITERATIONS};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// When the iteration stops.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Stopping {
    /// Run exactly `iterations` rounds.
    #[default]
    Fixed,
    /// Stop once the L1 norm of the round delta is below `tolerance`,
    /// or after `iterations` rounds, whichever comes first.
    Converged { tolerance: f64 },
}

/// Configuration for PageRank computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs jumping).
    /// Default: 0.85.
    pub damping: f64,
    /// Number of rounds (upper bound in converged mode).
    /// Default: 100.
    pub iterations: usize,
    /// Default: [`Stopping::Fixed`].
    pub stopping: Stopping,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            iterations: DEFAULT_ITERATIONS,
            stopping: Stopping::Fixed,
        }
    }
}

impl PageRankConfig {
    /// Switch to [`Stopping::Converged`] with the given tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.stopping = Stopping::Converged { tolerance };
        self
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// - [`RankError::InvalidDamping`] if `damping` is not in (0, 1).
    /// - [`RankError::InvalidTolerance`] if a converged-mode tolerance is not
    ///   finite and positive.
    pub fn validate(&self) -> Result<(), RankError> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(RankError::InvalidDamping(self.damping));
        }
        match self.stopping {
            Stopping::Converged { tolerance } if !(tolerance.is_finite() && tolerance > 0.0) => {
                Err(RankError::InvalidTolerance(tolerance))
            }
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Per-node rank, indexed by node. Sums to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankVector {
    ranks: Vec<f64>,
}

/// A node paired with its rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedNode {
    pub node: usize,
    pub rank: f64,
}

impl RankVector {
    /// Uniform prior: every one of `n` nodes at `1/n`. Empty when `n == 0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn uniform(n: usize) -> Self {
        if n == 0 {
            return Self { ranks: Vec::new() };
        }
        Self {
            ranks: vec![1.0 / n as f64; n],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Rank of `node`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, node: usize) -> Option<f64> {
        self.ranks.get(node).copied()
    }

    /// Sum over all nodes.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.ranks.iter().sum()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.ranks
    }

    /// Iterate `(node, rank)` in node order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.ranks.iter().copied().enumerate()
    }

    /// All nodes, highest rank first. Ties keep ascending node order.
    #[must_use]
    pub fn ranked(&self) -> Vec<RankedNode> {
        let mut ranked: Vec<RankedNode> = self
            .iter()
            .map(|(node, rank)| RankedNode { node, rank })
            .collect();
        ranked.sort_by(|a, b| b.rank.total_cmp(&a.rank).then(a.node.cmp(&b.node)));
        ranked
    }

    /// The `k` highest-ranked nodes.
    #[must_use]
    pub fn top(&self, k: usize) -> Vec<RankedNode> {
        let mut ranked = self.ranked();
        ranked.truncate(k);
        ranked
    }

    /// L1 distance to `other` (nodes missing from either side count as 0).
    #[must_use]
    pub fn l1_distance(&self, other: &Self) -> f64 {
        l1_delta(&self.ranks, &other.ranks)
    }
}

/// Result of a PageRank computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRankResult {
    pub ranks: RankVector,
    /// Number of rounds actually performed.
    pub iterations: usize,
    /// `true` only when [`Stopping::Converged`] ended the run early or on its
    /// last round. Always `false` in fixed mode, which never tests.
    pub converged: bool,
    /// L1 norm between the last two rank vectors; 0.0 if no round ran.
    pub final_delta: f64,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute PageRank with the default configuration (damping 0.85, exactly
/// 100 rounds).
///
/// # Errors
///
/// See [`pagerank`].
pub fn compute_ranks(adjacency: &AdjacencyMap, n: usize) -> Result<RankVector, RankError> {
    pagerank(adjacency, n, &PageRankConfig::default()).map(|result| result.ranks)
}

/// Compute PageRank over `adjacency` for `n` nodes.
///
/// All validation happens before the first round. On error no ranks are
/// produced.
///
/// # Errors
///
/// - [`RankError::InvalidSize`] if `n == 0`.
/// - [`RankError::SizeMismatch`] if the adjacency does not cover exactly `n` nodes.
/// - [`RankError::InvalidDamping`] / [`RankError::InvalidTolerance`] from
///   [`PageRankConfig::validate`].
#[instrument(skip(adjacency, config), fields(edges = adjacency.edge_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn pagerank(
    adjacency: &AdjacencyMap,
    n: usize,
    config: &PageRankConfig,
) -> Result<PageRankResult, RankError> {
    if n == 0 {
        return Err(RankError::InvalidSize { n, max: None });
    }
    if adjacency.node_count() != n {
        return Err(RankError::SizeMismatch {
            expected: n,
            actual: adjacency.node_count(),
        });
    }
    config.validate()?;

    let n_f64 = n as f64;
    let damping = config.damping;
    let base = (1.0 - damping) / n_f64;
    let dangling = adjacency.dangling_nodes();

    // Initialize ranks uniformly.
    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;
    let mut final_delta = 0.0_f64;

    for _ in 0..config.iterations {
        iterations += 1;

        // Dangling pages give d·PR/N to every page: summed once per round.
        let dangling_mass: f64 = dangling.iter().map(|&w| ranks[w]).sum();
        let floor = base + damping * dangling_mass / n_f64;
        new_ranks.fill(floor);

        // Distribute rank from each linking page to its outlinks.
        for (source, targets) in adjacency.iter() {
            if targets.is_empty() {
                continue;
            }
            let share = damping * ranks[source] / targets.len() as f64;
            for &target in targets {
                new_ranks[target] += share;
            }
        }

        final_delta = l1_delta(&ranks, &new_ranks);
        std::mem::swap(&mut ranks, &mut new_ranks);

        let settled =
            matches!(config.stopping, Stopping::Converged { tolerance } if final_delta < tolerance);
        if settled {
            converged = true;
            break;
        }
    }

    debug!(
        n,
        iterations,
        converged,
        final_delta,
        dangling = dangling.len(),
        "pagerank complete"
    );

    Ok(PageRankResult {
        ranks: RankVector { ranks },
        iterations,
        converged,
        final_delta,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn l1_delta(a: &[f64], b: &[f64]) -> f64 {
    let shared: f64 = a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum();
    let tail: f64 = if a.len() > b.len() {
        a[b.len()..].iter().map(|x| x.abs()).sum()
    } else {
        b[a.len()..].iter().map(|x| x.abs()).sum()
    };
    shared + tail
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
