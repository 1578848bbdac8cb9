mod common;

use common::MorphologyBuilder;
use retina_lib::{Morphology, MorphologyError, RetinaConfig, Vector2D};

/// Configuration problems must fail before any growth happens.
fn grow_err(modify: impl FnOnce(&mut RetinaConfig)) -> MorphologyError {
    let mut config = RetinaConfig::default();
    modify(&mut config);
    match Morphology::from_seed(&config, Vector2D::zero(), 1) {
        Ok(_) => panic!("Configuration should have been rejected"),
        Err(e) => e,
    }
}

#[test]
fn test_budget_below_one_step_rejected() {
    let err = grow_err(|c| {
        c.morphology.average_wirelength = 10.0;
        c.morphology.radius_deviation = 0.0;
    });
    assert!(matches!(err, MorphologyError::InvalidConfig(_)));
    assert!(err.to_string().contains("wirelength"));
}

#[test]
fn test_branch_count_errors() {
    assert!(matches!(
        grow_err(|c| c.morphology.min_branches = 0),
        MorphologyError::InvalidConfig(_)
    ));
    assert!(matches!(
        grow_err(|c| {
            c.morphology.min_branches = 5;
            c.morphology.max_branches = 2;
        }),
        MorphologyError::InvalidConfig(_)
    ));
}

#[test]
fn test_non_positive_lengths_rejected() {
    for err in [
        grow_err(|c| c.morphology.step_size = 0.0),
        grow_err(|c| c.morphology.step_size = f64::NAN),
        grow_err(|c| c.grid_size = 0.0),
        grow_err(|c| c.grid_size = -1.0),
        grow_err(|c| c.morphology.diffusion_width = 0.0),
        grow_err(|c| c.morphology.heading_deviation = 0.0),
        grow_err(|c| c.morphology.points_per_compartment = Some(0)),
        grow_err(|c| c.morphology.input_neurotransmitters.clear()),
    ] {
        assert!(matches!(err, MorphologyError::InvalidConfig(_)), "{}", err);
    }
}

#[test]
fn test_single_step_budget_grows_straight_stubs() {
    let m = MorphologyBuilder::new()
        .with_seed(2)
        .with_branches(3, 3)
        .with_morphology(|c| {
            c.average_wirelength = 15.0;
            c.radius_deviation = 0.0;
        })
        .build();

    assert_eq!(m.segments().len(), 3);
    for s in m.segments() {
        assert_eq!(s.locations.len(), 2);
        assert!(s.is_leaf());
    }
    assert_root_compartments!(m, 3);
}

#[test]
fn test_single_root_has_no_soma_links() {
    let m = MorphologyBuilder::new().with_seed(3).with_branches(1, 1).build();
    let roots: Vec<_> = m.root_compartments().collect();
    assert_eq!(roots.len(), 1);
    assert!(roots[0].proximal_neighbors.is_empty());
}

#[test]
fn test_full_circle_wander_still_terminates() {
    let m = MorphologyBuilder::new()
        .with_seed(4)
        .with_morphology(|c| c.heading_deviation = 180.0)
        .build();
    assert!(m.segments().iter().all(|s| !s.is_growing));
}

#[test]
fn test_blind_dendrites_still_terminate() {
    let m = MorphologyBuilder::new()
        .with_seed(5)
        .with_morphology(|c| c.dendrite_vision_radius = 0.0)
        .build();
    assert!(m.segments().iter().all(|s| !s.is_growing));
    assert_row_stochastic!(m.diffusion().weights);
}

#[test]
fn test_empty_palette_falls_back_to_white() {
    let mut config = RetinaConfig::default();
    config.palette.clear();
    let m = Morphology::from_seed(&config, Vector2D::zero(), 6).unwrap();
    assert!(m.compartments().iter().all(|c| c.color == [255, 255, 255]));
}

#[test]
fn test_toml_with_unknown_neurotransmitter_rejected() {
    let result = RetinaConfig::from_toml(
        r#"
        [morphology]
        input_neurotransmitters = ["DOPAMINE"]
        "#,
    );
    assert!(result.is_err());
}
