//! Geodesic diffusion weights between compartments.
//!
//! Compartments form an undirected graph whose edges connect proximal/distal
//! neighbors (and root compartments pairwise, through the soma). Each edge is
//! one step long. Shortest-path distances `D` are turned into weights by a
//! Gaussian kernel and row-normalized into the stochastic matrix `W`.

use crate::error::{MorphologyError, Result};
use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use retina_data::Compartment;
use serde::{Deserialize, Serialize};

/// Dense row-major square matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquareMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SquareMatrix {
    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            size,
            values: vec![value; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size + col]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[row * self.size + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.size..(row + 1) * self.size]
    }

    fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.values[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size.
        self.values.chunks_exact(self.size.max(1))
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|j| {
                let (a, b) = (self.get(i, j), self.get(j, i));
                a == b || (a - b).abs() <= tolerance
            })
        })
    }
}

/// Shortest-path distances and the row-stochastic diffusion matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffusionWeights {
    pub distances: SquareMatrix,
    pub weights: SquareMatrix,
}

impl DiffusionWeights {
    /// Recomputes `D` and `W` from scratch for the given compartment tree.
    ///
    /// `step_size` is the length of one compartment link and `width` the
    /// standard deviation of the Gaussian kernel, both in grid units.
    pub fn compute(compartments: &[Compartment], step_size: f64, width: f64) -> Result<Self> {
        let graph = compartment_graph(compartments, step_size);
        let n = compartments.len();

        let mut distances = SquareMatrix::filled(n, f64::INFINITY);
        for i in 0..n {
            let reached = dijkstra(&graph, NodeIndex::new(i), None, |e| *e.weight());
            for (node, cost) in reached {
                distances.set(i, node.index(), cost);
            }
        }

        let two_sigma_sq = 2.0 * width * width;
        let mut weights = SquareMatrix::filled(n, 0.0);
        for i in 0..n {
            let row = weights.row_mut(i);
            for (j, w) in row.iter_mut().enumerate() {
                let d = distances.get(i, j);
                *w = (-(d * d) / two_sigma_sq).exp();
            }

            let sum: f64 = row.iter().sum();
            if !sum.is_finite() || sum <= 0.0 {
                return Err(MorphologyError::DegenerateDiffusionRow { row: i, sum });
            }
            row.iter_mut().for_each(|w| *w /= sum);
        }

        tracing::debug!(compartments = n, width, "diffusion weights computed");
        Ok(Self { distances, weights })
    }

    pub fn size(&self) -> usize {
        self.weights.size()
    }
}

/// One node per compartment, one `step_size` edge per neighbor pair.
fn compartment_graph(compartments: &[Compartment], step_size: f64) -> UnGraph<usize, f64> {
    let mut graph = UnGraph::with_capacity(compartments.len(), compartments.len());
    for c in compartments {
        graph.add_node(c.index);
    }

    for (i, c) in compartments.iter().enumerate() {
        for &d in &c.distal_neighbors {
            graph.add_edge(NodeIndex::new(i), NodeIndex::new(d), step_size);
        }
        // Proximal links without a matching distal link join root compartments.
        for &p in &c.proximal_neighbors {
            let mirrored = compartments
                .get(p)
                .is_some_and(|q| q.distal_neighbors.contains(&i));
            if !mirrored && p > i {
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(p), step_size);
            }
        }
    }
    graph
}
