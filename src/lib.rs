//! Facade over the retina workspace crates plus the command-line front end.

pub mod app;

pub use retina_core::{
    config::RetinaConfig, diffusion::DiffusionWeights, error::MorphologyError,
    metrics::MorphologyStats, morphology::Morphology,
};
pub use retina_data::{Compartment, DendritePoint, Neurotransmitter, Vector2D};
