pub mod macros;

use retina_core::config::MorphologyConfig;
use retina_lib::{Morphology, RetinaConfig, Vector2D};

#[allow(dead_code)]
pub struct MorphologyBuilder {
    config: RetinaConfig,
    soma: Vector2D,
    seed: u64,
}

#[allow(dead_code)]
impl MorphologyBuilder {
    pub fn new() -> Self {
        Self {
            config: RetinaConfig::default(),
            soma: Vector2D::zero(),
            seed: 42,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_soma(mut self, x: f64, y: f64) -> Self {
        self.soma = Vector2D::new(x, y);
        self
    }

    pub fn with_branches(mut self, min: usize, max: usize) -> Self {
        self.config.morphology.min_branches = min;
        self.config.morphology.max_branches = max;
        self
    }

    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.config.grid_size = grid_size;
        self
    }

    pub fn with_morphology<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut MorphologyConfig),
    {
        modifier(&mut self.config.morphology);
        self
    }

    pub fn config(&self) -> &RetinaConfig {
        &self.config
    }

    pub fn build(self) -> Morphology {
        Morphology::from_seed(&self.config, self.soma, self.seed)
            .expect("Failed to grow morphology in test builder")
    }
}

/// Standard scenario: six roots, no budget spread.
#[allow(dead_code)]
pub fn six_root_scenario(seed: u64) -> Morphology {
    MorphologyBuilder::new()
        .with_seed(seed)
        .with_branches(6, 6)
        .with_morphology(|m| {
            m.average_wirelength = 150.0;
            m.radius_deviation = 0.0;
            m.step_size = 15.0;
            m.heading_deviation = 10.0;
        })
        .build()
}

/// True if segments `p1-p2` and `q1-q2` cross at a point interior to both.
#[allow(dead_code)]
pub fn segments_cross(p1: Vector2D, p2: Vector2D, q1: Vector2D, q2: Vector2D) -> bool {
    fn orient(a: Vector2D, b: Vector2D, c: Vector2D) -> f64 {
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }
    const EPS: f64 = 1e-9;
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);
    ((d1 > EPS && d2 < -EPS) || (d1 < -EPS && d2 > EPS))
        && ((d3 > EPS && d4 < -EPS) || (d3 < -EPS && d4 > EPS))
}
