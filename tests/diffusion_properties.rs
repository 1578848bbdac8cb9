mod common;

use common::MorphologyBuilder;
use retina_core::diffusion::DiffusionWeights;

#[test]
fn test_weights_are_row_stochastic() {
    for seed in [1, 2, 3] {
        let m = MorphologyBuilder::new().with_seed(seed).build();
        assert_row_stochastic!(m.diffusion().weights);
    }
}

#[test]
fn test_distances_symmetric_with_zero_diagonal() {
    let m = MorphologyBuilder::new().with_seed(4).build();
    assert_symmetric!(m.diffusion().distances);
}

#[test]
fn test_tree_is_connected_through_soma() {
    let m = MorphologyBuilder::new().with_seed(5).build();
    let d = &m.diffusion().distances;
    for i in 0..d.size() {
        for j in 0..d.size() {
            assert!(d.get(i, j).is_finite(), "D[{}][{}] unreachable", i, j);
        }
    }
}

#[test]
fn test_neighbor_distance_is_one_step() {
    let m = MorphologyBuilder::new().with_seed(6).build();
    let step = m.params().step_size;
    let d = &m.diffusion().distances;
    for c in m.compartments() {
        for &n in c.distal_neighbors.iter().chain(&c.proximal_neighbors) {
            assert_eq!(d.get(c.index, n), step);
        }
    }
}

#[test]
fn test_distances_respect_triangle_inequality() {
    let m = MorphologyBuilder::new().with_seed(7).with_branches(4, 4).build();
    let d = &m.diffusion().distances;
    let n = d.size();
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                assert!(d.get(i, j) <= d.get(i, k) + d.get(k, j) + 1e-9);
            }
        }
    }
}

#[test]
fn test_weights_decay_with_distance() {
    let m = MorphologyBuilder::new().with_seed(8).build();
    let dw = m.diffusion();
    for i in 0..dw.size() {
        for j in 0..dw.size() {
            for k in 0..dw.size() {
                if dw.distances.get(i, j) < dw.distances.get(i, k) {
                    assert!(dw.weights.get(i, j) >= dw.weights.get(i, k));
                }
            }
        }
    }
}

#[test]
fn test_recomputation_matches() {
    let m = MorphologyBuilder::new().with_seed(9).build();
    let again = DiffusionWeights::compute(
        m.compartments(),
        m.params().step_size,
        m.params().diffusion_width,
    )
    .unwrap();
    assert_eq!(&again, m.diffusion());
}

#[test]
fn test_wider_kernel_spreads_weight() {
    let narrow = MorphologyBuilder::new()
        .with_seed(10)
        .with_morphology(|c| c.diffusion_width = 10.0)
        .build();
    let wide = MorphologyBuilder::new()
        .with_seed(10)
        .with_morphology(|c| c.diffusion_width = 100.0)
        .build();

    // Same seed and growth parameters give the same tree.
    assert_eq!(narrow.compartments().len(), wide.compartments().len());
    for i in 0..narrow.compartments().len() {
        assert!(wide.diffusion().weights.get(i, i) <= narrow.diffusion().weights.get(i, i));
    }
}
