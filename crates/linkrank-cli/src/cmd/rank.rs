//! `linkrank rank` and `linkrank demo`: score pages and list them by rank.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use linkrank_core::config::EffectiveConfig;
use linkrank_core::ingest::{LinkDataset, demo_dataset};
use linkrank_core::{PageRankConfig, Stopping, pagerank};
use serde::Serialize;
use tracing::{debug, info};

use crate::cmd::load_input;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `linkrank rank`.
#[derive(Args, Debug, Default)]
pub struct RankArgs {
    /// Link data: analyzer matrix JSON (`.json`) or a `from to` edge list.
    /// The built-in demo site is ranked when omitted.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Probability of following a link rather than jumping (0 < d < 1).
    #[arg(long)]
    pub damping: Option<f64>,

    /// Number of update rounds (upper bound when --tolerance is set).
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Stop early once the L1 change between rounds drops below this value.
    #[arg(long, conflicts_with = "fixed")]
    pub tolerance: Option<f64>,

    /// Always run every round, ignoring a configured tolerance.
    #[arg(long)]
    pub fixed: bool,

    /// Show only the K highest-ranked pages.
    #[arg(long, value_name = "K")]
    pub top: Option<usize>,

    /// Largest matrix accepted (edge lists are not limited).
    #[arg(long)]
    pub max_nodes: Option<usize>,
}

/// One row of the ranking.
#[derive(Debug, Serialize)]
pub struct RankedPage {
    pub position: usize,
    pub node: usize,
    pub page: String,
    pub rank: f64,
}

/// Report payload for `linkrank rank`.
#[derive(Debug, Serialize)]
pub struct RankReport {
    pub pages: usize,
    pub links: usize,
    pub damping: f64,
    pub iterations: usize,
    pub converged: bool,
    pub final_delta: f64,
    pub total: f64,
    pub ranks: Vec<RankedPage>,
}

/// Execute `linkrank rank`.
pub fn run_rank(args: &RankArgs, config: &EffectiveConfig, output: OutputMode) -> anyhow::Result<()> {
    let dataset = match args.input.as_deref() {
        Some(path) => load_input(path)?,
        None => {
            info!("no input given, ranking the built-in demo site");
            demo_dataset()
        }
    };
    rank_dataset(&dataset, args, config, output)
}

/// Execute `linkrank demo`.
pub fn run_demo(config: &EffectiveConfig, output: OutputMode) -> anyhow::Result<()> {
    rank_dataset(&demo_dataset(), &RankArgs::default(), config, output)
}

fn rank_dataset(
    dataset: &LinkDataset,
    args: &RankArgs,
    config: &EffectiveConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let n = dataset.page_count();
    let pr_config = pagerank_config(args, config);

    let adjacency = dataset.adjacency(args.max_nodes.unwrap_or(config.max_nodes))?;
    let result = pagerank(&adjacency, n, &pr_config)?;

    debug!(
        pages = n,
        iterations = result.iterations,
        converged = result.converged,
        "ranked dataset"
    );

    let ranked = match args.top.or(config.top) {
        Some(k) => result.ranks.top(k),
        None => result.ranks.ranked(),
    };
    let report = RankReport {
        pages: n,
        links: adjacency.edge_count(),
        damping: pr_config.damping,
        iterations: result.iterations,
        converged: result.converged,
        final_delta: result.final_delta,
        total: result.ranks.sum(),
        ranks: ranked
            .iter()
            .enumerate()
            .map(|(i, r)| RankedPage {
                position: i + 1,
                node: r.node,
                page: dataset.label(r.node),
                rank: r.rank,
            })
            .collect(),
    };

    render_mode(output, &report, render_rank_text, render_rank_pretty)
}

/// Flags override config values, which override the built-in defaults.
fn pagerank_config(args: &RankArgs, config: &EffectiveConfig) -> PageRankConfig {
    let base = config.pagerank_config();
    PageRankConfig {
        damping: args.damping.unwrap_or(base.damping),
        iterations: args.iterations.unwrap_or(base.iterations),
        stopping: match args.tolerance {
            _ if args.fixed => Stopping::Fixed,
            Some(tolerance) => Stopping::Converged { tolerance },
            None => base.stopping,
        },
    }
}

fn render_rank_text(report: &RankReport, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &report.ranks {
        writeln!(w, "{}\t{:.6}\t{}", row.position, row.rank, row.page)?;
    }
    Ok(())
}

fn render_rank_pretty(report: &RankReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "PageRank")?;
    pretty_kv(w, "Pages", report.pages.to_string())?;
    pretty_kv(w, "Links", report.links.to_string())?;
    pretty_kv(w, "Damping", format!("{}", report.damping))?;
    let rounds = if report.converged {
        format!("{} (converged, delta {:.2e})", report.iterations, report.final_delta)
    } else {
        report.iterations.to_string()
    };
    pretty_kv(w, "Rounds", rounds)?;
    writeln!(w)?;

    let width = report
        .ranks
        .iter()
        .map(|r| r.page.len())
        .max()
        .unwrap_or(4)
        .max(4);
    writeln!(w, "{:>4}  {:<width$}  {:>10}", "#", "Page", "Rank")?;
    for row in &report.ranks {
        writeln!(
            w,
            "{:>4}  {:<width$}  {:>10.6}",
            row.position, row.page, row.rank
        )?;
    }
    writeln!(w)?;
    pretty_kv(w, "Total", format!("{:.6}", report.total))
}
