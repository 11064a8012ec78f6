use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::metrics::pagerank::{PageRankConfig, Stopping};
use crate::{DEFAULT_DAMPING, DEFAULT_ITERATIONS, DEFAULT_MAX_NODES};

/// Contents of a `config.toml`. Every key is optional so that a project file
/// can override a single value from the user file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub rank: RankSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankSection {
    pub damping: Option<f64>,
    pub iterations: Option<usize>,
    pub tolerance: Option<f64>,
    pub max_nodes: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub format: Option<String>,
    pub top: Option<usize>,
}

impl FileConfig {
    /// Fill every unset key from `lower`.
    #[must_use]
    pub fn or(self, lower: Self) -> Self {
        Self {
            rank: RankSection {
                damping: self.rank.damping.or(lower.rank.damping),
                iterations: self.rank.iterations.or(lower.rank.iterations),
                tolerance: self.rank.tolerance.or(lower.rank.tolerance),
                max_nodes: self.rank.max_nodes.or(lower.rank.max_nodes),
            },
            output: OutputSection {
                format: self.output.format.or(lower.output.format),
                top: self.output.top.or(lower.output.top),
            },
        }
    }
}

/// Fully resolved settings with built-in defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveConfig {
    pub damping: f64,
    pub iterations: usize,
    pub tolerance: Option<f64>,
    pub max_nodes: usize,
    pub format: Option<String>,
    pub top: Option<usize>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self::from_file(FileConfig::default())
    }
}

impl EffectiveConfig {
    #[must_use]
    pub fn from_file(file: FileConfig) -> Self {
        Self {
            damping: file.rank.damping.unwrap_or(DEFAULT_DAMPING),
            iterations: file.rank.iterations.unwrap_or(DEFAULT_ITERATIONS),
            tolerance: file.rank.tolerance,
            max_nodes: file.rank.max_nodes.unwrap_or(DEFAULT_MAX_NODES),
            format: file.output.format,
            top: file.output.top,
        }
    }

    /// The rank parameters as a [`PageRankConfig`]. A tolerance selects
    /// converged mode.
    #[must_use]
    pub fn pagerank_config(&self) -> PageRankConfig {
        PageRankConfig {
            damping: self.damping,
            iterations: self.iterations,
            stopping: self
                .tolerance
                .map_or(Stopping::Fixed, |tolerance| Stopping::Converged { tolerance }),
        }
    }
}

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".linkrank/config.toml")
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("linkrank/config.toml"))
}

/// Read a config file. A missing file is an empty config.
pub fn load_config_file(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<FileConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_project_config(project_root: &Path) -> Result<FileConfig> {
    load_config_file(&project_config_path(project_root))
}

pub fn load_user_config() -> Result<FileConfig> {
    let Some(path) = user_config_path() else {
        return Ok(FileConfig::default());
    };
    load_config_file(&path)
}

/// Resolve project and user files under the built-in defaults.
///
/// When `explicit` is given it replaces the project file and must exist.
pub fn resolve_config(project_root: &Path, explicit: Option<&Path>) -> Result<EffectiveConfig> {
    let project = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            load_config_file(path)?
        }
        None => load_project_config(project_root)?,
    };
    let user = load_user_config()?;

    Ok(EffectiveConfig::from_file(project.or(user)))
}
