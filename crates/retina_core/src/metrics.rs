//! Summary statistics and structured logging for generated morphologies.

use crate::morphology::Morphology;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "retina=info,retina_core=info";

/// Shape summary of one morphology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphologyStats {
    pub roots: usize,
    pub segments: usize,
    pub branch_points: usize,
    pub tips: usize,
    /// Grown wirelength summed over every segment, grid units.
    pub total_wirelength: f64,
    pub compartments: usize,
    pub root_compartments: usize,
    pub points: usize,
    pub releasing_points: usize,
    /// Largest soma-to-point path length, grid units.
    pub max_wirelength: f64,
    pub growth_ticks: u64,
}

impl MorphologyStats {
    #[must_use]
    pub fn collect(morphology: &Morphology) -> Self {
        let segments = morphology.segments();
        let (points, releasing_points, max_wirelength) =
            morphology
                .points()
                .fold((0, 0, 0.0_f64), |(count, releasing, max), p| {
                    (
                        count + 1,
                        releasing + usize::from(p.is_releasing()),
                        max.max(p.wirelength),
                    )
                });

        Self {
            roots: morphology.arbor().roots().len(),
            segments: segments.len(),
            branch_points: segments.iter().filter(|s| !s.is_leaf()).count(),
            tips: segments.iter().filter(|s| s.is_leaf()).count(),
            total_wirelength: morphology.arbor().total_wirelength(),
            compartments: morphology.compartments().len(),
            root_compartments: morphology.root_compartments().count(),
            points,
            releasing_points,
            max_wirelength,
            growth_ticks: morphology.arbor().ticks(),
        }
    }

    /// Emits the summary as a single structured event.
    pub fn log(&self) {
        tracing::info!(
            roots = self.roots,
            segments = self.segments,
            branch_points = self.branch_points,
            tips = self.tips,
            compartments = self.compartments,
            points = self.points,
            total_wirelength = self.total_wirelength,
            "Morphology grown"
        );
    }
}

/// Initialize tracing subscriber for logging.
///
/// Filters come from `RUST_LOG`, defaulting to `info` for the retina crates.
/// Output goes to stderr so a report on stdout stays parseable. A second
/// call leaves the first subscriber in place.
pub fn init_logging() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok();
}
