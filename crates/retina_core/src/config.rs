//! Configuration management for morphology generation.
//!
//! This module provides strongly-typed configuration structures that map to
//! a `retina.toml` file. Lengths are given in physical units (micrometres) and
//! are converted into grid units through [`RetinaConfig::grid_size`] when the
//! growth parameters are resolved.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `retina.toml` file (overrides defaults)
//! 3. Command-line overrides (seed, soma location)
//!
//! ## Example `retina.toml`
//!
//! ```toml
//! grid_size = 1.0
//! seed = 42
//!
//! [soma]
//! x = 0.0
//! y = 0.0
//!
//! [morphology]
//! average_wirelength = 150.0
//! step_size = 15.0
//! min_branches = 4
//! max_branches = 6
//! ```

use retina_data::{Neurotransmitter, Vector2D};
use serde::{Deserialize, Serialize};

/// Parameters of a single starburst morphology, in physical units.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MorphologyConfig {
    /// Mean wirelength budget of a root branch.
    pub average_wirelength: f64,
    /// Relative spread of the per-root budget, `[0, 1)`.
    pub radius_deviation: f64,
    pub min_branches: usize,
    pub max_branches: usize,
    /// Half-width of the cone a segment may wander in, degrees.
    pub heading_deviation: f64,
    pub step_size: f64,
    /// Wirelength after which a segment branches with certainty.
    pub max_segment_length: f64,
    /// Angle between a parent heading and each child heading, degrees.
    pub children_deviation: f64,
    pub dendrite_vision_radius: f64,
    /// Standard deviation of the Gaussian diffusion kernel.
    pub diffusion_width: f64,
    pub decay_rate: f64,
    pub input_strength: f64,
    /// Fraction of `average_wirelength` beyond which points release neurotransmitter.
    pub distal_release_fraction: f64,
    /// Target points per compartment. Derived from `step_size` when unset.
    pub points_per_compartment: Option<usize>,
    pub input_neurotransmitters: Vec<Neurotransmitter>,
    pub output_neurotransmitters: Vec<Neurotransmitter>,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        Self {
            average_wirelength: 150.0,
            radius_deviation: 0.1,
            min_branches: 4,
            max_branches: 6,
            heading_deviation: 10.0,
            step_size: 15.0,
            max_segment_length: 35.0,
            children_deviation: 20.0,
            dendrite_vision_radius: 15.0,
            diffusion_width: 35.0,
            decay_rate: 0.1,
            input_strength: 0.5,
            distal_release_fraction: 2.0 / 3.0,
            points_per_compartment: None,
            input_neurotransmitters: vec![Neurotransmitter::Glu, Neurotransmitter::Gaba],
            output_neurotransmitters: vec![Neurotransmitter::Gaba, Neurotransmitter::Ach],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RetinaConfig {
    /// Physical length of one grid unit.
    pub grid_size: f64,
    pub seed: Option<u64>,
    /// Soma location, in grid units.
    pub soma: Vector2D,
    pub morphology: MorphologyConfig,
    /// Compartment colors, cycled per root branch. Cosmetic only.
    pub palette: Vec<[u8; 3]>,
}

impl Default for RetinaConfig {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            seed: None,
            soma: Vector2D::zero(),
            morphology: MorphologyConfig::default(),
            palette: vec![
                [230, 25, 75],
                [60, 180, 75],
                [255, 225, 25],
                [0, 130, 200],
                [245, 130, 48],
                [145, 30, 180],
            ],
        }
    }
}

impl RetinaConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    ///
    /// # Validation Rules
    /// - Grid size, step size and diffusion width must be positive
    /// - A step must span at least one grid unit
    /// - The smallest root budget must afford at least one step
    /// - Branch counts must satisfy `1 <= min <= max`
    /// - Angular deviations must lie within half a turn
    pub fn validate(&self) -> anyhow::Result<()> {
        let m = &self.morphology;

        anyhow::ensure!(
            self.grid_size.is_finite() && self.grid_size > 0.0,
            "Grid size must be positive"
        );
        anyhow::ensure!(self.soma.is_finite(), "Soma location must be finite");

        anyhow::ensure!(
            m.step_size.is_finite() && m.step_size > 0.0,
            "Step size must be positive"
        );
        anyhow::ensure!(
            m.step_size / self.grid_size >= 1.0,
            "Step size must span at least one grid unit"
        );
        anyhow::ensure!(
            m.radius_deviation >= 0.0 && m.radius_deviation < 1.0,
            "Radius deviation must be in [0.0, 1.0)"
        );
        anyhow::ensure!(
            m.average_wirelength.is_finite()
                && m.average_wirelength * (1.0 - m.radius_deviation) >= m.step_size,
            "Average wirelength too small: every root would die before its first step"
        );
        anyhow::ensure!(m.min_branches > 0, "Min branches must be positive");
        anyhow::ensure!(
            m.min_branches <= m.max_branches,
            "Min branches must not exceed max branches"
        );
        anyhow::ensure!(
            m.heading_deviation > 0.0 && m.heading_deviation <= 180.0,
            "Heading deviation must be in (0.0, 180.0]"
        );
        anyhow::ensure!(
            (0.0..=180.0).contains(&m.children_deviation),
            "Children deviation must be in [0.0, 180.0]"
        );
        anyhow::ensure!(
            m.max_segment_length >= 0.0,
            "Max segment length must be non-negative"
        );
        anyhow::ensure!(
            m.dendrite_vision_radius >= 0.0,
            "Dendrite vision radius must be non-negative"
        );
        anyhow::ensure!(
            m.diffusion_width.is_finite() && m.diffusion_width > 0.0,
            "Diffusion width must be positive"
        );
        anyhow::ensure!(m.decay_rate >= 0.0, "Decay rate must be non-negative");
        anyhow::ensure!(
            m.distal_release_fraction >= 0.0,
            "Distal release fraction must be non-negative"
        );
        anyhow::ensure!(
            m.points_per_compartment != Some(0),
            "Points per compartment must be positive"
        );
        anyhow::ensure!(
            !m.input_neurotransmitters.is_empty(),
            "At least one input neurotransmitter is required"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Stable digest of every parameter that shapes the generated morphology.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.grid_size).as_bytes());
        hasher.update(format!("{:?}", self.soma).as_bytes());
        hasher.update(format!("{:?}", self.morphology).as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Growth parameters resolved into grid units.
///
/// Built from a validated [`RetinaConfig`]; every length here has already been
/// divided by the grid size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthParams {
    pub average_wirelength: f64,
    pub radius_deviation: f64,
    pub min_branches: usize,
    pub max_branches: usize,
    pub heading_deviation: f64,
    pub step_size: f64,
    pub max_segment_length: f64,
    pub children_deviation: f64,
    pub vision_radius: f64,
    pub diffusion_width: f64,
    pub release_wirelength: f64,
    pub points_per_compartment: usize,
    pub input_neurotransmitters: Vec<Neurotransmitter>,
    pub output_neurotransmitters: Vec<Neurotransmitter>,
    pub palette: Vec<[u8; 3]>,
}

impl GrowthParams {
    pub fn from_config(config: &RetinaConfig) -> Self {
        let m = &config.morphology;
        let to_grid = |length: f64| length / config.grid_size;
        let step_size = to_grid(m.step_size);
        let average_wirelength = to_grid(m.average_wirelength);

        Self {
            average_wirelength,
            radius_deviation: m.radius_deviation,
            min_branches: m.min_branches,
            max_branches: m.max_branches,
            heading_deviation: m.heading_deviation,
            step_size,
            max_segment_length: to_grid(m.max_segment_length),
            children_deviation: m.children_deviation,
            vision_radius: to_grid(m.dendrite_vision_radius),
            diffusion_width: to_grid(m.diffusion_width),
            release_wirelength: average_wirelength * m.distal_release_fraction,
            points_per_compartment: m
                .points_per_compartment
                .unwrap_or_else(|| step_size.round().max(1.0) as usize),
            input_neurotransmitters: m.input_neurotransmitters.clone(),
            output_neurotransmitters: m.output_neurotransmitters.clone(),
            palette: config.palette.clone(),
        }
    }

    /// Inclusive bounds of a root branch's wirelength budget.
    pub fn budget_bounds(&self) -> (f64, f64) {
        (
            self.average_wirelength * (1.0 - self.radius_deviation),
            self.average_wirelength * (1.0 + self.radius_deviation),
        )
    }
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self::from_config(&RetinaConfig::default())
    }
}
