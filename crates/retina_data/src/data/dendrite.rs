use super::geometry::GridPoint;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Neurotransmitters a dendrite point can accept or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Neurotransmitter {
    Gaba,
    Ach,
    Glu,
    Gly,
}

impl Neurotransmitter {
    pub fn label(self) -> &'static str {
        match self {
            Self::Gaba => "GABA",
            Self::Ach => "ACH",
            Self::Glu => "GLU",
            Self::Gly => "GLY",
        }
    }
}

impl fmt::Display for Neurotransmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A grid-snapped sample of the dendrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DendritePoint {
    pub location: GridPoint,
    /// Path length from the soma along the tree, in grid units.
    pub wirelength: f64,
    /// Heading of this point as seen from the soma, degrees.
    pub heading_from_soma: f64,
    pub accepts: BTreeSet<Neurotransmitter>,
    pub releases: BTreeSet<Neurotransmitter>,
}

impl DendritePoint {
    pub fn is_releasing(&self) -> bool {
        !self.releases.is_empty()
    }
}

/// Coarse electrical unit of the dendritic tree.
///
/// Neighbor links are indices into the owning compartment list. A non-root
/// compartment has exactly one proximal neighbor; root compartments share the
/// soma and list each other as proximal neighbors instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compartment {
    pub index: usize,
    pub root_index: usize,
    pub proximal_neighbors: Vec<usize>,
    pub distal_neighbors: Vec<usize>,
    pub points: Vec<DendritePoint>,
    pub color: [u8; 3],
    /// Fraction of points accepting each neurotransmitter.
    pub input_weights: BTreeMap<Neurotransmitter, f64>,
    /// Fraction of points releasing each neurotransmitter.
    pub output_weights: BTreeMap<Neurotransmitter, f64>,
}

impl Compartment {
    pub fn new(index: usize, root_index: usize, color: [u8; 3]) -> Self {
        Self {
            index,
            root_index,
            proximal_neighbors: Vec::new(),
            distal_neighbors: Vec::new(),
            points: Vec::new(),
            color,
            input_weights: BTreeMap::new(),
            output_weights: BTreeMap::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.distal_neighbors.is_empty()
    }

    /// Recomputes the neurotransmitter weight maps from the point tags.
    pub fn refresh_neurotransmitter_weights(&mut self) {
        self.input_weights.clear();
        self.output_weights.clear();
        if self.points.is_empty() {
            return;
        }

        for point in &self.points {
            for &nt in &point.accepts {
                *self.input_weights.entry(nt).or_insert(0.0) += 1.0;
            }
            for &nt in &point.releases {
                *self.output_weights.entry(nt).or_insert(0.0) += 1.0;
            }
        }

        let count = self.points.len() as f64;
        for weight in self
            .input_weights
            .values_mut()
            .chain(self.output_weights.values_mut())
        {
            *weight /= count;
        }
    }
}
