//! `linkrank summary`: link statistics for a dataset.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use linkrank_core::LinkStats;
use linkrank_core::ingest::demo_dataset;
use serde::Serialize;

use crate::cmd::load_input;
use crate::output::{OutputMode, pretty_kv, pretty_section, render};

/// Arguments for `linkrank summary`.
#[derive(Args, Debug, Default)]
pub struct SummaryArgs {
    /// Link data file. The built-in demo site is summarized when omitted.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct PageSummary {
    pub node: usize,
    pub page: String,
    pub out_links: usize,
    pub in_links: usize,
}

/// Report payload for `linkrank summary`.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub content_hash: String,
    pub stats: LinkStats,
    pub pages: Vec<PageSummary>,
}

/// Execute `linkrank summary`.
pub fn run_summary(args: &SummaryArgs, output: OutputMode) -> anyhow::Result<()> {
    let dataset = match args.input.as_deref() {
        Some(path) => load_input(path)?,
        None => demo_dataset(),
    };

    let graph = dataset.graph()?;
    let stats = LinkStats::from_adjacency(&graph.to_adjacency());
    let pages = (0..stats.node_count)
        .map(|node| PageSummary {
            node,
            page: dataset.label(node),
            out_links: stats.out_degrees[node],
            in_links: stats.in_degrees[node],
        })
        .collect();

    let report = SummaryReport {
        content_hash: graph.content_hash(),
        stats,
        pages,
    };
    render(output, &report, render_summary_human)
}

fn render_summary_human(report: &SummaryReport, w: &mut dyn Write) -> std::io::Result<()> {
    let stats = &report.stats;
    pretty_section(w, "Link summary")?;
    pretty_kv(w, "Pages", stats.node_count.to_string())?;
    pretty_kv(w, "Links", stats.edge_count.to_string())?;
    pretty_kv(w, "Self-links", stats.self_link_count.to_string())?;
    pretty_kv(w, "Dangling", stats.dangling_count.to_string())?;
    pretty_kv(w, "Isolated", stats.isolated_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", stats.density))?;
    pretty_kv(w, "Hash", &report.content_hash)?;
    if stats.is_flat() {
        writeln!(w, "No links: every page ranks 1/N.")?;
    }
    writeln!(w)?;

    writeln!(w, "{:>4}  {:>4}  {:>4}  Page", "#", "Out", "In")?;
    for page in &report.pages {
        writeln!(
            w,
            "{:>4}  {:>4}  {:>4}  {}",
            page.node, page.out_links, page.in_links, page.page
        )?;
    }
    Ok(())
}
