//! CLI command implementations

use anyhow::Context;
use coursemap_core::write_graph;
use coursemap_ingest::{MergeConfig, MergeOutcome};
use std::path::{Path, PathBuf};

/// Default config file name looked up under the root.
pub const CONFIG_FILE: &str = "coursemap.toml";

/// Values given on the command line that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub annotations: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

pub fn build(root: &Path, overrides: &Overrides) -> anyhow::Result<()> {
    let config = load_config(root, overrides)?;
    let outcome = merge(root, &config)?;

    let output = MergeConfig::resolve(root, &config.output);
    write_graph(&outcome.graph, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| output.display().to_string());
    println!("Wrote {} with {}.", name, outcome.report);
    Ok(())
}

pub fn check(root: &Path, overrides: &Overrides) -> anyhow::Result<()> {
    let config = load_config(root, overrides)?;
    let outcome = merge(root, &config)?;

    println!("Merged {}.", outcome.report);
    Ok(())
}

fn merge(root: &Path, config: &MergeConfig) -> anyhow::Result<MergeOutcome> {
    tracing::info!("Merging {} courses under {}", config.courses.len(), root.display());
    coursemap_ingest::run(config, root).context("Merge failed")
}

/// Explicit `--config`, else `coursemap.toml` under the root, else built-in defaults.
pub fn load_config(root: &Path, overrides: &Overrides) -> anyhow::Result<MergeConfig> {
    let mut config = match &overrides.config {
        Some(path) => MergeConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => {
            let default_path = root.join(CONFIG_FILE);
            if default_path.exists() {
                MergeConfig::load(&default_path)
                    .with_context(|| format!("Failed to load config {}", default_path.display()))?
            } else {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE);
                MergeConfig::default()
            }
        }
    };

    if let Some(dir) = &overrides.annotations {
        config.annotations.dir = dir.clone();
    }
    if let Some(output) = &overrides.output {
        config.output = output.clone();
    }

    Ok(config)
}
