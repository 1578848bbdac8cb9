//! End-to-end generation of one starburst morphology.

use crate::arbor::Arbor;
use crate::compartment::{compartmentalize, CompartmentTree};
use crate::config::{GrowthParams, RetinaConfig};
use crate::diffusion::DiffusionWeights;
use crate::discretize::discretize;
use crate::error::{MorphologyError, Result};
use crate::metrics::MorphologyStats;
use crate::segment::DendriteSegment;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use retina_data::{Compartment, DendritePoint, Vector2D};
use sha2::{Digest, Sha256};

/// A grown, discretized and compartmentalized dendritic tree.
///
/// Immutable once built. Changing a parameter means growing a new one.
#[derive(Debug, Clone)]
pub struct Morphology {
    params: GrowthParams,
    arbor: Arbor,
    segment_points: Vec<Vec<DendritePoint>>,
    tree: CompartmentTree,
    diffusion: DiffusionWeights,
}

impl Morphology {
    /// Runs the full pipeline: growth, discretization, compartments, diffusion.
    pub fn grow<R: Rng>(config: &RetinaConfig, soma: Vector2D, rng: &mut R) -> Result<Self> {
        config.validate()?;
        if !soma.is_finite() {
            return Err(MorphologyError::invalid_config(format!(
                "Soma location must be finite, got ({}, {})",
                soma.x, soma.y
            )));
        }
        let params = GrowthParams::from_config(config);

        let span = tracing::debug_span!("morphology", soma_x = soma.x, soma_y = soma.y);
        let _enter = span.enter();

        let arbor = Arbor::grow(soma, &params, rng);
        let segment_points = discretize(arbor.segments(), soma, &params);
        let tree = compartmentalize(arbor.segments(), &segment_points, &params);
        if tree.compartments.is_empty() {
            return Err(MorphologyError::EmptyArbor);
        }
        let diffusion =
            DiffusionWeights::compute(&tree.compartments, params.step_size, params.diffusion_width)?;

        Ok(Self {
            params,
            arbor,
            segment_points,
            tree,
            diffusion,
        })
    }

    /// Grows a morphology from a fixed seed.
    pub fn from_seed(config: &RetinaConfig, soma: Vector2D, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::grow(config, soma, &mut rng)
    }

    pub fn soma(&self) -> Vector2D {
        self.arbor.soma
    }

    pub fn params(&self) -> &GrowthParams {
        &self.params
    }

    pub fn arbor(&self) -> &Arbor {
        &self.arbor
    }

    pub fn segments(&self) -> &[DendriteSegment] {
        self.arbor.segments()
    }

    pub fn root_segments(&self) -> impl Iterator<Item = &DendriteSegment> {
        self.arbor
            .roots()
            .iter()
            .filter_map(|&id| self.arbor.segment(id))
    }

    /// Grid points emitted for each segment, indexed like [`Self::segments`].
    pub fn segment_points(&self) -> &[Vec<DendritePoint>] {
        &self.segment_points
    }

    /// All grid points in walk order.
    pub fn points(&self) -> impl Iterator<Item = &DendritePoint> {
        self.segment_points.iter().flatten()
    }

    pub fn compartments(&self) -> &[Compartment] {
        &self.tree.compartments
    }

    pub fn root_compartments(&self) -> impl Iterator<Item = &Compartment> {
        self.tree
            .roots
            .iter()
            .filter_map(|&i| self.tree.compartments.get(i))
    }

    pub fn diffusion(&self) -> &DiffusionWeights {
        &self.diffusion
    }

    pub fn stats(&self) -> MorphologyStats {
        MorphologyStats::collect(self)
    }

    /// SHA-256 over the compartment tree and every grid point in it.
    pub fn deterministic_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for c in &self.tree.compartments {
            hasher.update((c.index as u64).to_le_bytes());
            hasher.update((c.root_index as u64).to_le_bytes());
            for &n in c.proximal_neighbors.iter().chain(&c.distal_neighbors) {
                hasher.update((n as u64).to_le_bytes());
            }
            for p in &c.points {
                hasher.update(p.location.x.to_le_bytes());
                hasher.update(p.location.y.to_le_bytes());
                // Bits keep the hash stable across float formatting
                hasher.update(p.wirelength.to_bits().to_le_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}
