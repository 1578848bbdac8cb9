mod common;

use common::{six_root_scenario, MorphologyBuilder};
use retina_core::segment::Termination;

#[test]
fn test_six_root_scenario_root_compartments() {
    for seed in [1, 2, 3, 42, 1234] {
        let m = six_root_scenario(seed);
        assert_root_compartments!(m, 6);
        assert_eq!(m.root_segments().count(), 6);
    }
}

#[test]
fn test_six_root_scenario_path_length_bound() {
    for seed in [1, 7, 99] {
        let m = six_root_scenario(seed);
        for segment in m.segments() {
            let edges = m.arbor().path_edges(segment.index);
            assert!(
                edges <= 10,
                "Segment {} has {} edges on its soma path",
                segment.index,
                edges
            );
        }
    }
}

#[test]
fn test_root_headings_evenly_spaced() {
    let m = six_root_scenario(5);
    let headings: Vec<f64> = m.root_segments().map(|s| s.heading).collect();
    assert_eq!(headings, vec![0.0, 60.0, 120.0, 180.0, 240.0, 300.0]);
}

#[test]
fn test_every_segment_stops_with_a_reason() {
    let m = MorphologyBuilder::new().with_seed(17).build();
    for s in m.segments() {
        assert!(!s.is_growing);
        match s.termination {
            Some(Termination::Branched) => assert_eq!(s.children.len(), 2),
            Some(_) => assert!(s.children.is_empty()),
            None => panic!("Segment {} never terminated", s.index),
        }
    }
}

#[test]
fn test_branching_actually_happens_with_defaults() {
    let m = MorphologyBuilder::new().with_seed(3).with_branches(6, 6).build();
    let stats = m.stats();
    assert!(stats.branch_points > 0, "Expected at least one branch point");
    assert_eq!(stats.segments, stats.roots + 2 * stats.branch_points);
}

#[test]
fn test_children_inherit_parent_tip_and_budget() {
    let m = MorphologyBuilder::new().with_seed(8).build();
    let segments = m.segments();
    for s in segments {
        for &c in &s.children {
            let child = &segments[c];
            assert_eq!(child.locations[0], s.tip());
            assert!((child.initial_resources - s.resources).abs() < 1e-9);
            assert_eq!(child.root_index, s.root_index);
        }
    }
}

#[test]
fn test_grid_size_scales_growth() {
    let coarse = MorphologyBuilder::new().with_seed(4).with_grid_size(1.0).build();
    let fine = MorphologyBuilder::new().with_seed(4).with_grid_size(0.5).build();

    assert_eq!(coarse.params().step_size, 15.0);
    assert_eq!(fine.params().step_size, 30.0);
    assert!(fine.stats().max_wirelength > coarse.stats().max_wirelength);
}

#[test]
fn test_releasing_points_are_distal() {
    let m = MorphologyBuilder::new().with_seed(21).build();
    let threshold = m.params().release_wirelength;
    for p in m.points() {
        assert_eq!(p.is_releasing(), p.wirelength >= threshold);
        assert!(!p.accepts.is_empty());
    }
}
