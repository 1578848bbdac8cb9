//! # Retina Core
//!
//! Procedural growth of starburst amacrine cell morphologies.
//!
//! This crate contains the deterministic morphology pipeline:
//! - Stochastic, self-avoiding dendrite growth under a wirelength budget
//! - Projection of the grown arbor onto an integer grid
//! - Point-count compartmentalization of the dendritic tree
//! - Geodesic diffusion weights between compartments
//! - Configuration, statistics and structured logging
//!
//! ## Architecture
//!
//! Segments and compartments live in append-only arenas and refer to each
//! other by index. Growth is a single-threaded round-robin over the active
//! branches, driven by an injected seedable RNG, so a seed fully determines
//! the morphology.
//!
//! ## Example
//!
//! ```
//! use retina_core::config::RetinaConfig;
//! use retina_core::morphology::Morphology;
//! use retina_data::Vector2D;
//!
//! let config = RetinaConfig::default();
//! let morphology = Morphology::from_seed(&config, Vector2D::zero(), 42).unwrap();
//!
//! let w = &morphology.diffusion().weights;
//! let row_sum: f64 = w.row(0).iter().sum();
//! assert!((row_sum - 1.0).abs() < 1e-9);
//! ```

/// Round-robin scheduler over growing branches
pub mod arbor;
/// Point-count compartmentalization
pub mod compartment;
/// Configuration management for morphology parameters
pub mod config;
/// Geodesic distance and diffusion weight matrices
pub mod diffusion;
/// Grid discretization of the grown arbor
pub mod discretize;
/// Error types
pub mod error;
/// Angular interval arithmetic
pub mod heading;
/// Summary statistics and structured logging
pub mod metrics;
/// End-to-end morphology pipeline
pub mod morphology;
/// Single-branch growth with collision avoidance
pub mod segment;

pub use arbor::Arbor;
pub use compartment::{compartmentalize, CompartmentTree};
pub use config::{GrowthParams, MorphologyConfig, RetinaConfig};
pub use diffusion::{DiffusionWeights, SquareMatrix};
pub use error::{MorphologyError, Result};
pub use metrics::{init_logging, MorphologyStats};
pub use morphology::Morphology;
pub use segment::{DendriteSegment, Growth, Termination};
