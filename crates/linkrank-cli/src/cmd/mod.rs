//! Subcommand handlers.

pub mod completions;
pub mod rank;
pub mod summary;

use std::path::Path;

use linkrank_core::ingest::{LinkDataset, load_dataset};
use tracing::info;

/// Load a dataset named on the command line.
pub fn load_input(path: &Path) -> anyhow::Result<LinkDataset> {
    let dataset = load_dataset(path)?;
    info!(
        path = %path.display(),
        pages = dataset.page_count(),
        "loaded link data"
    );
    Ok(dataset)
}
