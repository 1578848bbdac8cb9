//! Command-line front end: argument model, configuration loading and the
//! JSON report printed by the `retina` binary.

use anyhow::{Context, Result};
use clap::Parser;
use retina_core::config::RetinaConfig;
use retina_core::metrics::MorphologyStats;
use retina_core::morphology::Morphology;
use retina_data::{Compartment, Vector2D};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about = "Grow a starburst amacrine cell morphology", long_about = None)]
pub struct Args {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// RNG seed, overrides the config file
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Soma x coordinate in grid units
    #[arg(long, allow_hyphen_values = true)]
    pub soma_x: Option<f64>,

    /// Soma y coordinate in grid units
    #[arg(long, allow_hyphen_values = true)]
    pub soma_y: Option<f64>,

    /// Include the full compartment tree in the report
    #[arg(long)]
    pub dump: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub seed: u64,
    pub fingerprint: String,
    pub hash: String,
    pub stats: MorphologyStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compartments: Option<Vec<Compartment>>,
}

impl Report {
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Loads `path`, falling back to defaults when it is absent or missing.
pub fn load_config(path: Option<&Path>) -> Result<RetinaConfig> {
    let Some(path) = path else {
        return Ok(RetinaConfig::default());
    };
    if !path.exists() {
        tracing::warn!("Config file {} not found, using defaults", path.display());
        return Ok(RetinaConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    RetinaConfig::from_toml(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Grows one morphology as described by `args`.
pub fn run(args: &Args) -> Result<Report> {
    let config = load_config(args.config.as_deref())?;

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    let soma = Vector2D::new(
        args.soma_x.unwrap_or(config.soma.x),
        args.soma_y.unwrap_or(config.soma.y),
    );
    anyhow::ensure!(soma.is_finite(), "Soma location must be finite");

    tracing::info!(seed, fingerprint = %config.fingerprint(), "Growing morphology");
    let morphology = Morphology::from_seed(&config, soma, seed)?;
    let stats = morphology.stats();
    stats.log();

    Ok(Report {
        seed,
        fingerprint: config.fingerprint(),
        hash: morphology.deterministic_hash(),
        stats,
        compartments: args.dump.then(|| morphology.compartments().to_vec()),
    })
}
